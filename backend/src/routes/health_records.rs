//! Health record routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch};
use axum::{Json, Router};
use chrono::{Duration, NaiveTime, Utc};
use serde_json::{json, Map, Value};
use shared::{CreateHealthRecordRequest, HealthRecord, HealthRecordStatus, MessageResponse};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::error::{ApiError, AppJson};
use crate::storage::DocumentStore;

pub fn router<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(list_records::<S>).post(create_record::<S>))
        .route("/child/:child_id", get(records_for_child::<S>))
        .route("/upcoming/:child_id", get(upcoming_for_child::<S>))
        .route(
            "/:id",
            get(get_record::<S>)
                .put(update_record::<S>)
                .delete(delete_record::<S>),
        )
        .route("/:id/complete", patch(complete_record::<S>))
}

pub async fn list_records<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Json<Vec<HealthRecord>> {
    info!("GET /api/health");
    Json(state.store.get_all::<HealthRecord>())
}

pub async fn records_for_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(child_id): Path<String>,
) -> Json<Vec<HealthRecord>> {
    info!("GET /api/health/child/{child_id}");
    Json(state.store.find_by_child_id::<HealthRecord>(&child_id))
}

pub async fn get_record<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<HealthRecord>, ApiError> {
    info!("GET /api/health/{id}");
    state
        .store
        .find_by_id::<HealthRecord>(&id)
        .map(Json)
        .ok_or(ApiError::NotFound("Health record"))
}

pub async fn create_record<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<CreateHealthRecordRequest>,
) -> Result<(StatusCode, Json<HealthRecord>), ApiError> {
    info!("POST /api/health - title: {}", request.title);

    let record = HealthRecord {
        id: Uuid::new_v4().to_string(),
        child_id: request.child_id,
        kind: request.kind,
        title: request.title,
        date: request.date,
        status: request.status.unwrap_or(HealthRecordStatus::Scheduled),
        notes: request.notes.unwrap_or_default(),
        completed_at: None,
        created_at: Utc::now(),
    };
    let record = state
        .store
        .create(record)
        .map_err(|e| ApiError::internal("Failed to create health record", e))?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_record<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> Result<Json<HealthRecord>, ApiError> {
    info!("PUT /api/health/{id}");
    state
        .store
        .update::<HealthRecord>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to update health record", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Health record"))
}

pub async fn delete_record<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("DELETE /api/health/{id}");
    let existed = state
        .store
        .delete::<HealthRecord>(&id)
        .map_err(|e| ApiError::internal("Failed to delete health record", e))?;
    if !existed {
        return Err(ApiError::NotFound("Health record"));
    }
    Ok(Json(MessageResponse {
        message: "Health record deleted successfully".to_string(),
    }))
}

/// Scheduled records for the child dated within the next seven days.
pub async fn upcoming_for_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(child_id): Path<String>,
) -> Json<Vec<HealthRecord>> {
    info!("GET /api/health/upcoming/{child_id}");

    let now = Utc::now();
    let next_week = now + Duration::days(7);
    let upcoming = state
        .store
        .find_by_child_id::<HealthRecord>(&child_id)
        .into_iter()
        .filter(|record| {
            let at = record.date.and_time(NaiveTime::MIN).and_utc();
            at >= now && at <= next_week && record.status == HealthRecordStatus::Scheduled
        })
        .collect();
    Json(upcoming)
}

pub async fn complete_record<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<HealthRecord>, ApiError> {
    info!("PATCH /api/health/{id}/complete");

    let mut patch = Map::new();
    patch.insert("status".to_string(), json!("completed"));
    patch.insert("completedAt".to_string(), json!(Utc::now()));
    state
        .store
        .update::<HealthRecord>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to complete health record", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Health record"))
}
