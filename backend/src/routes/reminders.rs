//! Reminder routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{json, Map, Value};
use shared::{CreateReminderRequest, MessageResponse, Reminder};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::error::{ApiError, AppJson};
use crate::storage::DocumentStore;

pub fn router<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(list_reminders::<S>).post(create_reminder::<S>))
        .route("/child/:child_id", get(reminders_for_child::<S>))
        .route("/active", get(active_reminders::<S>))
        .route("/upcoming", get(upcoming_reminders::<S>))
        .route(
            "/:id",
            axum::routing::put(update_reminder::<S>).delete(delete_reminder::<S>),
        )
        .route("/:id/toggle", patch(toggle_reminder::<S>))
        .route("/:id/trigger", patch(trigger_reminder::<S>))
}

pub async fn list_reminders<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Json<Vec<Reminder>> {
    info!("GET /api/reminders");
    Json(state.store.get_all::<Reminder>())
}

pub async fn reminders_for_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(child_id): Path<String>,
) -> Json<Vec<Reminder>> {
    info!("GET /api/reminders/child/{child_id}");
    Json(state.store.find_by_child_id::<Reminder>(&child_id))
}

pub async fn active_reminders<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Json<Vec<Reminder>> {
    info!("GET /api/reminders/active");
    let active = state
        .store
        .get_all::<Reminder>()
        .into_iter()
        .filter(|reminder| reminder.is_active)
        .collect();
    Json(active)
}

pub async fn upcoming_reminders<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Json<Vec<Reminder>> {
    info!("GET /api/reminders/upcoming");
    Json(state.store.upcoming_reminders())
}

pub async fn create_reminder<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<CreateReminderRequest>,
) -> Result<(StatusCode, Json<Reminder>), ApiError> {
    info!("POST /api/reminders - title: {}", request.title);

    let reminder = Reminder {
        id: Uuid::new_v4().to_string(),
        child_id: request.child_id,
        kind: request.kind,
        title: request.title,
        time: request.time,
        date: request.date,
        frequency: request.frequency.unwrap_or_default(),
        notes: request.notes.unwrap_or_default(),
        is_active: true,
        last_triggered: None,
        created_at: Utc::now(),
    };
    let reminder = state
        .store
        .create(reminder)
        .map_err(|e| ApiError::internal("Failed to create reminder", e))?;

    Ok((StatusCode::CREATED, Json(reminder)))
}

pub async fn update_reminder<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> Result<Json<Reminder>, ApiError> {
    info!("PUT /api/reminders/{id}");
    state
        .store
        .update::<Reminder>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to update reminder", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Reminder"))
}

pub async fn delete_reminder<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("DELETE /api/reminders/{id}");
    let existed = state
        .store
        .delete::<Reminder>(&id)
        .map_err(|e| ApiError::internal("Failed to delete reminder", e))?;
    if !existed {
        return Err(ApiError::NotFound("Reminder"));
    }
    Ok(Json(MessageResponse {
        message: "Reminder deleted successfully".to_string(),
    }))
}

pub async fn toggle_reminder<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>, ApiError> {
    info!("PATCH /api/reminders/{id}/toggle");

    let Some(reminder) = state.store.find_by_id::<Reminder>(&id) else {
        return Err(ApiError::NotFound("Reminder"));
    };
    let mut patch = Map::new();
    patch.insert("isActive".to_string(), json!(!reminder.is_active));
    state
        .store
        .update::<Reminder>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to toggle reminder", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Reminder"))
}

pub async fn trigger_reminder<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Reminder>, ApiError> {
    info!("PATCH /api/reminders/{id}/trigger");

    let mut patch = Map::new();
    patch.insert("lastTriggered".to_string(), json!(Utc::now()));
    state
        .store
        .update::<Reminder>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to trigger reminder", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Reminder"))
}
