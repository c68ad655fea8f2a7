//! # JSON File Store
//!
//! File-backed [`DocumentStore`]: one JSON document with a top-level array
//! per collection, held in memory behind an `RwLock` and written back on
//! every mutation. A missing or unreadable file yields an empty store so
//! a fresh deployment starts from nothing.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{AiInsight, CarePlan, Child, ChildWithDetails, HealthRecord, Reminder};
use tracing::{debug, warn};

use super::{Collection, Document, DocumentStore, StorageError};
use crate::domain::reminders;

/// Persisted layout: one array per collection, camelCase names.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoreData {
    children: Vec<Value>,
    parents: Vec<Value>,
    health_records: Vec<Value>,
    reminders: Vec<Value>,
    care_plans: Vec<Value>,
    ai_insights: Vec<Value>,
}

impl StoreData {
    fn rows(&self, collection: Collection) -> &Vec<Value> {
        match collection {
            Collection::Children => &self.children,
            Collection::Parents => &self.parents,
            Collection::HealthRecords => &self.health_records,
            Collection::Reminders => &self.reminders,
            Collection::CarePlans => &self.care_plans,
            Collection::AiInsights => &self.ai_insights,
        }
    }

    fn rows_mut(&mut self, collection: Collection) -> &mut Vec<Value> {
        match collection {
            Collection::Children => &mut self.children,
            Collection::Parents => &mut self.parents,
            Collection::HealthRecords => &mut self.health_records,
            Collection::Reminders => &mut self.reminders,
            Collection::CarePlans => &mut self.care_plans,
            Collection::AiInsights => &mut self.ai_insights,
        }
    }
}

struct Inner {
    path: PathBuf,
    data: RwLock<StoreData>,
}

/// File-backed document store. Cheap to clone; clones share the same
/// in-memory state and data file.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<Inner>,
}

impl JsonStore {
    /// Open (or initialize) the store at `path`, creating parent
    /// directories as needed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let data = Self::load(&path);
        Ok(Self {
            inner: Arc::new(Inner {
                path,
                data: RwLock::new(data),
            }),
        })
    }

    fn load(path: &Path) -> StoreData {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(data) => data,
                Err(e) => {
                    warn!("data file {} is unreadable, starting empty: {}", path.display(), e);
                    StoreData::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no data file at {}, starting empty", path.display());
                StoreData::default()
            }
            Err(e) => {
                warn!("could not read data file {}, starting empty: {}", path.display(), e);
                StoreData::default()
            }
        }
    }

    fn save(&self, data: &StoreData) -> Result<(), StorageError> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.inner.path, serialized)?;
        Ok(())
    }

    fn decode<T: Document>(value: &Value) -> Option<T> {
        match serde_json::from_value(value.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(
                    "skipping malformed document in {}: {}",
                    T::COLLECTION.name(),
                    e
                );
                None
            }
        }
    }

    fn row_id(value: &Value) -> Option<&str> {
        value.get("id").and_then(Value::as_str)
    }
}

impl DocumentStore for JsonStore {
    fn create<T: Document>(&self, item: T) -> Result<T, StorageError> {
        let mut data = self
            .inner
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        data.rows_mut(T::COLLECTION).push(serde_json::to_value(&item)?);
        self.save(&data)?;
        Ok(item)
    }

    fn find_by_id<T: Document>(&self, id: &str) -> Option<T> {
        let data = self
            .inner
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        data.rows(T::COLLECTION)
            .iter()
            .find(|row| Self::row_id(row) == Some(id))
            .and_then(Self::decode)
    }

    fn find_by_child_id<T: Document>(&self, child_id: &str) -> Vec<T> {
        let data = self
            .inner
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        data.rows(T::COLLECTION)
            .iter()
            .filter_map(Self::decode::<T>)
            .filter(|item| item.child_id() == Some(child_id))
            .collect()
    }

    fn update<T: Document>(
        &self,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Option<T>, StorageError> {
        let mut data = self
            .inner
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let Some(row) = data
            .rows_mut(T::COLLECTION)
            .iter_mut()
            .find(|row| Self::row_id(row) == Some(id))
        else {
            return Ok(None);
        };

        // Top-level key merge, then re-type to validate and stamp.
        let mut merged = match row.as_object() {
            Some(existing) => existing.clone(),
            None => Map::new(),
        };
        for (key, value) in patch {
            merged.insert(key, value);
        }
        let mut item: T = serde_json::from_value(Value::Object(merged))?;
        item.touch(Utc::now());
        *row = serde_json::to_value(&item)?;

        self.save(&data)?;
        Ok(Some(item))
    }

    fn delete<T: Document>(&self, id: &str) -> Result<bool, StorageError> {
        let mut data = self
            .inner
            .data
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let rows = data.rows_mut(T::COLLECTION);
        let Some(index) = rows.iter().position(|row| Self::row_id(row) == Some(id)) else {
            return Ok(false);
        };
        rows.remove(index);
        self.save(&data)?;
        Ok(true)
    }

    fn get_all<T: Document>(&self) -> Vec<T> {
        let data = self
            .inner
            .data
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        data.rows(T::COLLECTION)
            .iter()
            .filter_map(Self::decode)
            .collect()
    }

    fn child_with_details(&self, child_id: &str) -> Option<ChildWithDetails> {
        let child = self.find_by_id::<Child>(child_id)?;
        Some(ChildWithDetails {
            health_records: self.find_by_child_id::<HealthRecord>(child_id),
            reminders: self.find_by_child_id::<Reminder>(child_id),
            care_plans: self.find_by_child_id::<CarePlan>(child_id),
            ai_insights: self.find_by_child_id::<AiInsight>(child_id),
            child,
        })
    }

    fn upcoming_reminders(&self) -> Vec<Reminder> {
        let now = Utc::now();
        self.get_all::<Reminder>()
            .into_iter()
            .filter(|reminder| reminders::in_upcoming_window(reminder, now))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate, Utc};
    use serde_json::json;
    use shared::{
        DevelopmentMilestones, Frequency, Gender, HealthRecordStatus, MedicalHistory,
    };
    use tempfile::tempdir;
    use uuid::Uuid;

    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> JsonStore {
        JsonStore::open(dir.path().join("models.json")).unwrap()
    }

    fn sample_child(name: &str) -> Child {
        let now = Utc::now();
        Child {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
            gender: Gender::Female,
            parent_id: "parent-1".to_string(),
            medical_history: MedicalHistory::default(),
            development_milestones: DevelopmentMilestones::starting(now),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_reminder(child_id: &str, date: Option<NaiveDate>, active: bool) -> Reminder {
        Reminder {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            kind: "medication".to_string(),
            title: "Vitamin D".to_string(),
            time: Some("08:00".to_string()),
            date,
            frequency: Frequency::Daily,
            notes: String::new(),
            is_active: active,
            last_triggered: None,
            created_at: Utc::now(),
        }
    }

    fn sample_record(child_id: &str) -> HealthRecord {
        HealthRecord {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            kind: "checkup".to_string(),
            title: "12 month checkup".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            status: HealthRecordStatus::Scheduled,
            notes: String::new(),
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn create_then_find_by_id_round_trips() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        let child = store.create(sample_child("Ava")).unwrap();
        let found = store.find_by_id::<Child>(&child.id).unwrap();
        assert_eq!(found, child);
    }

    #[test]
    fn find_by_id_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        assert!(store.find_by_id::<Child>("no-such-id").is_none());
    }

    #[test]
    fn delete_reports_whether_a_document_existed() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        assert!(!store.delete::<Child>("no-such-id").unwrap());

        let child = store.create(sample_child("Ava")).unwrap();
        assert!(store.delete::<Child>(&child.id).unwrap());
        assert!(store.find_by_id::<Child>(&child.id).is_none());
    }

    #[test]
    fn update_merges_only_supplied_fields_and_bumps_updated_at() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let child = store.create(sample_child("Ava")).unwrap();

        let mut patch = Map::new();
        patch.insert("name".to_string(), json!("Ava Marie"));
        let updated = store.update::<Child>(&child.id, patch).unwrap().unwrap();

        assert_eq!(updated.name, "Ava Marie");
        assert_eq!(updated.gender, child.gender);
        assert_eq!(updated.parent_id, child.parent_id);
        assert!(updated.updated_at > child.updated_at);
    }

    #[test]
    fn update_missing_id_is_none() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let result = store.update::<Child>("no-such-id", Map::new()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn update_does_not_stamp_types_without_updated_at() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let reminder = store.create(sample_reminder("c1", None, true)).unwrap();

        let mut patch = Map::new();
        patch.insert("title".to_string(), json!("Vitamin C"));
        let updated = store
            .update::<Reminder>(&reminder.id, patch)
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "Vitamin C");
        assert_eq!(updated.created_at, reminder.created_at);
    }

    #[test]
    fn find_by_child_id_filters_on_owner() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);

        store.create(sample_record("c1")).unwrap();
        store.create(sample_record("c1")).unwrap();
        store.create(sample_record("c2")).unwrap();

        assert_eq!(store.find_by_child_id::<HealthRecord>("c1").len(), 2);
        assert_eq!(store.find_by_child_id::<HealthRecord>("c2").len(), 1);
        assert!(store.find_by_child_id::<HealthRecord>("c3").is_empty());
    }

    #[test]
    fn child_with_details_assembles_empty_collections_for_new_child() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let child = store.create(sample_child("Ava")).unwrap();

        let details = store.child_with_details(&child.id).unwrap();
        assert_eq!(details.child.id, child.id);
        assert!(details.health_records.is_empty());
        assert!(details.reminders.is_empty());
        assert!(details.care_plans.is_empty());
        assert!(details.ai_insights.is_empty());

        assert!(store.child_with_details("no-such-id").is_none());
    }

    #[test]
    fn upcoming_reminders_window() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir);
        let today = Utc::now().date_naive();

        let dateless = store.create(sample_reminder("c1", None, true)).unwrap();
        let tomorrow = store
            .create(sample_reminder("c1", today.checked_add_days(Days::new(1)), true))
            .unwrap();
        let far = store
            .create(sample_reminder("c1", today.checked_add_days(Days::new(3)), true))
            .unwrap();
        let past = store
            .create(sample_reminder("c1", today.checked_sub_days(Days::new(1)), true))
            .unwrap();
        let inactive = store.create(sample_reminder("c1", None, false)).unwrap();

        let upcoming = store.upcoming_reminders();
        let ids: Vec<&str> = upcoming.iter().map(|r| r.id.as_str()).collect();

        assert!(ids.contains(&dateless.id.as_str()));
        assert!(ids.contains(&tomorrow.id.as_str()));
        assert!(!ids.contains(&far.id.as_str()));
        assert!(!ids.contains(&past.id.as_str()));
        assert!(!ids.contains(&inactive.id.as_str()));
    }

    #[test]
    fn reopening_the_store_sees_persisted_documents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.json");

        let child = {
            let store = JsonStore::open(&path).unwrap();
            store.create(sample_child("Ava")).unwrap()
        };

        let reopened = JsonStore::open(&path).unwrap();
        let found = reopened.find_by_id::<Child>(&child.id).unwrap();
        assert_eq!(found.name, "Ava");
    }

    #[test]
    fn corrupt_data_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.json");
        fs::write(&path, "not json at all").unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert!(store.get_all::<Child>().is_empty());
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("models.json");
        fs::write(
            &path,
            serde_json::to_string(&json!({
                "children": [{"id": "broken", "name": 42}],
                "reminders": []
            }))
            .unwrap(),
        )
        .unwrap();

        let store = JsonStore::open(&path).unwrap();
        assert!(store.get_all::<Child>().is_empty());
        assert!(store.find_by_id::<Child>("broken").is_none());
    }
}
