//! # Storage Layer
//!
//! Typed document storage over named collections. The seven-operation
//! [`DocumentStore`] contract is what the rest of the backend programs
//! against, so the file-backed implementation can be swapped for a
//! document database without touching callers. Entity kinds are selected
//! at compile time through the [`Document`] trait rather than by passing
//! collection names around as strings.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use shared::{ChildWithDetails, Reminder};
use thiserror::Error;

pub mod documents;
mod json_file;

pub use json_file::JsonStore;

/// Errors surfaced by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to persist the data file: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The sealed set of collections a document can live in. Names match the
/// top-level arrays of the persisted JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Children,
    Parents,
    HealthRecords,
    Reminders,
    CarePlans,
    AiInsights,
}

impl Collection {
    pub const fn name(self) -> &'static str {
        match self {
            Collection::Children => "children",
            Collection::Parents => "parents",
            Collection::HealthRecords => "healthRecords",
            Collection::Reminders => "reminders",
            Collection::CarePlans => "carePlans",
            Collection::AiInsights => "aiInsights",
        }
    }
}

/// A persistable entity. Implemented once per entity type; the associated
/// collection ties the type to its storage slot at compile time.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const COLLECTION: Collection;

    fn id(&self) -> &str;

    /// The owning child's id, for the types that reference one.
    fn child_id(&self) -> Option<&str>;

    /// Refresh the `updatedAt` stamp after a merge-update. Default is a
    /// no-op; only the types that carry the stamp override it.
    fn touch(&mut self, _now: DateTime<Utc>) {}
}

/// Uniform CRUD over collections plus the two derived queries.
///
/// Backends must implement exactly this contract so the domain and route
/// layers stay storage-agnostic.
pub trait DocumentStore: Clone + Send + Sync + 'static {
    /// Store a new document, returning the stored form.
    fn create<T: Document>(&self, item: T) -> Result<T, StorageError>;

    /// Look up a document by id. A missing id is `None`, never an error.
    fn find_by_id<T: Document>(&self, id: &str) -> Option<T>;

    /// All documents referencing the given child. Order is not guaranteed.
    fn find_by_child_id<T: Document>(&self, child_id: &str) -> Vec<T>;

    /// Merge the supplied top-level fields into an existing document and
    /// refresh its `updatedAt` stamp. `None` when no document has the id.
    fn update<T: Document>(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<T>, StorageError>;

    /// Remove a document. Returns whether a document with the id existed.
    fn delete<T: Document>(&self, id: &str) -> Result<bool, StorageError>;

    /// Every document in the collection.
    fn get_all<T: Document>(&self) -> Vec<T>;

    /// A child assembled together with all records that reference it.
    fn child_with_details(&self, child_id: &str) -> Option<ChildWithDetails>;

    /// Active reminders dated within the next 24 hours, plus every active
    /// reminder with no date (treated as recurring).
    fn upcoming_reminders(&self) -> Vec<Reminder>;
}
