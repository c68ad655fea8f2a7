//! Child profile routes, including the per-child insight endpoints and
//! the caller-driven cascade delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Map, Value};
use shared::{
    AiInsight, CarePlan, Child, ChildWithDetails, CreateChildRequest, DevelopmentMilestones,
    GenerateInsightRequest, HealthRecord, MessageResponse, Reminder,
};
use tracing::{error, info};
use uuid::Uuid;

use super::AppState;
use crate::error::{ApiError, AppJson};
use crate::storage::{Document, DocumentStore};

pub fn router<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(list_children::<S>).post(create_child::<S>))
        .route(
            "/:id",
            get(get_child::<S>)
                .put(update_child::<S>)
                .delete(delete_child::<S>),
        )
        .route(
            "/:id/insights",
            get(list_insights::<S>).post(generate_insight::<S>),
        )
}

pub async fn list_children<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Json<Vec<Child>> {
    info!("GET /api/children");
    Json(state.store.get_all::<Child>())
}

pub async fn get_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<ChildWithDetails>, ApiError> {
    info!("GET /api/children/{id}");
    state
        .store
        .child_with_details(&id)
        .map(Json)
        .ok_or(ApiError::NotFound("Child"))
}

pub async fn create_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<CreateChildRequest>,
) -> Result<(StatusCode, Json<Child>), ApiError> {
    info!("POST /api/children - name: {}", request.name);

    let now = Utc::now();
    let child = Child {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        date_of_birth: request.date_of_birth,
        gender: request.gender,
        parent_id: request.parent_id,
        medical_history: request.medical_history.unwrap_or_default(),
        development_milestones: DevelopmentMilestones::starting(now),
        created_at: now,
        updated_at: now,
    };
    let child = state
        .store
        .create(child)
        .map_err(|e| ApiError::internal("Failed to create child", e))?;

    // Seed a welcome insight; profile creation succeeds even if this
    // part fails.
    let tip = state
        .ai
        .personalized_tip(&child, "New child profile created")
        .await;
    let insight = AiInsight::new(
        &child.id,
        "welcome",
        "Welcome to Parent Copilot",
        tip.tip,
        0.9,
        Utc::now(),
    );
    if let Err(e) = state.store.create(insight) {
        error!("failed to store welcome insight for {}: {}", child.id, e);
    }

    Ok((StatusCode::CREATED, Json(child)))
}

pub async fn update_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> Result<Json<Child>, ApiError> {
    info!("PUT /api/children/{id}");
    state
        .store
        .update::<Child>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to update child", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Child"))
}

pub async fn delete_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("DELETE /api/children/{id}");

    let existed = state
        .store
        .delete::<Child>(&id)
        .map_err(|e| ApiError::internal("Failed to delete child", e))?;
    if !existed {
        return Err(ApiError::NotFound("Child"));
    }

    // Cascade is caller-driven and best-effort: a failed related delete
    // is logged and does not roll back the ones already done.
    delete_related::<HealthRecord, S>(&state.store, &id);
    delete_related::<Reminder, S>(&state.store, &id);
    delete_related::<CarePlan, S>(&state.store, &id);
    delete_related::<AiInsight, S>(&state.store, &id);

    Ok(Json(MessageResponse {
        message: "Child and related records deleted successfully".to_string(),
    }))
}

fn delete_related<T: Document, S: DocumentStore>(store: &S, child_id: &str) {
    for item in store.find_by_child_id::<T>(child_id) {
        if let Err(e) = store.delete::<T>(item.id()) {
            error!(
                "cascade delete failed for {} {}: {}",
                T::COLLECTION.name(),
                item.id(),
                e
            );
        }
    }
}

pub async fn list_insights<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<AiInsight>>, ApiError> {
    info!("GET /api/children/{id}/insights");
    if state.store.find_by_id::<Child>(&id).is_none() {
        return Err(ApiError::NotFound("Child"));
    }
    Ok(Json(state.store.find_by_child_id::<AiInsight>(&id)))
}

pub async fn generate_insight<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(request): AppJson<GenerateInsightRequest>,
) -> Result<(StatusCode, Json<AiInsight>), ApiError> {
    info!("POST /api/children/{id}/insights");

    let Some(child) = state.store.find_by_id::<Child>(&id) else {
        return Err(ApiError::NotFound("Child"));
    };

    let tip = state
        .ai
        .personalized_tip(&child, request.context.as_deref().unwrap_or(""))
        .await;
    let insight = AiInsight::new(
        &child.id,
        "personalized",
        "Personalized Health Tip",
        tip.tip,
        0.85,
        Utc::now(),
    );
    let insight = state
        .store
        .create(insight)
        .map_err(|e| ApiError::internal("Failed to generate insight", e))?;

    Ok((StatusCode::CREATED, Json(insight)))
}
