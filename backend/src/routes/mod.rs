//! # REST Surface
//!
//! One module per route group, assembled under `/api`. Handlers translate
//! HTTP verbs and paths into store and AI-service calls, perform presence
//! validation only, and log each request the same way throughout.

use axum::routing::get;
use axum::{Json, Router};
use shared::ServiceStatus;

use crate::ai::AiService;
use crate::storage::DocumentStore;

pub mod ai;
pub mod care_plans;
pub mod children;
pub mod health_records;
pub mod reminders;

/// Shared handler state: the document store (generic, so backends can be
/// swapped) and the AI advisory service.
#[derive(Clone)]
pub struct AppState<S> {
    pub store: S,
    pub ai: AiService,
}

/// The full `/api` router.
pub fn api_router<S: DocumentStore>(state: AppState<S>) -> Router {
    Router::new()
        .nest("/api/children", children::router::<S>())
        .nest("/api/health", health_records::router::<S>())
        .nest("/api/reminders", reminders::router::<S>())
        .nest("/api/care-plans", care_plans::router::<S>())
        .nest("/api/ai", ai::router::<S>())
        .route("/api/healthz", get(healthz))
        .with_state(state)
}

/// Service liveness check.
async fn healthz() -> Json<ServiceStatus> {
    Json(ServiceStatus {
        status: "OK".to_string(),
        message: "Parent Copilot API is running".to_string(),
    })
}


#[cfg(test)]
pub(crate) mod test_support {
    use tempfile::TempDir;

    use super::*;
    use crate::ai::testing;
    use crate::storage::JsonStore;

    /// State over a tempdir-backed store and a model that always fails,
    /// so AI content is the deterministic fallback.
    pub fn state(dir: &TempDir) -> AppState<JsonStore> {
        AppState {
            store: JsonStore::open(dir.path().join("models.json")).unwrap(),
            ai: testing::failing(),
        }
    }

    /// Same store, but the model replies with `reply` every time.
    pub fn state_with_reply(dir: &TempDir, reply: &str) -> AppState<JsonStore> {
        AppState {
            store: JsonStore::open(dir.path().join("models.json")).unwrap(),
            ai: testing::canned(reply),
        }
    }
}
