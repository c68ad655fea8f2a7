//! Care plan routes: CRUD, per-task operations, and AI (re)generation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Map, Value};
use shared::{
    AddTaskRequest, CarePlan, Child, CreateCarePlanRequest, MessageResponse,
    RegeneratePlanRequest, UpdateTaskRequest,
};
use tracing::info;
use uuid::Uuid;

use super::AppState;
use crate::domain::care_plans;
use crate::error::{ApiError, AppJson};
use crate::storage::DocumentStore;

pub fn router<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/", get(list_plans::<S>).post(create_plan::<S>))
        .route("/child/:child_id", get(plans_for_child::<S>))
        .route(
            "/:id",
            get(get_plan::<S>).put(update_plan::<S>).delete(delete_plan::<S>),
        )
        .route("/:id/tasks", post(add_task::<S>))
        .route(
            "/:id/tasks/:task_id",
            patch(update_task::<S>).delete(delete_task::<S>),
        )
        .route("/:id/regenerate", post(regenerate_plan::<S>))
}

pub async fn list_plans<S: DocumentStore>(
    State(state): State<AppState<S>>,
) -> Json<Vec<CarePlan>> {
    info!("GET /api/care-plans");
    Json(state.store.get_all::<CarePlan>())
}

pub async fn plans_for_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(child_id): Path<String>,
) -> Json<Vec<CarePlan>> {
    info!("GET /api/care-plans/child/{child_id}");
    Json(state.store.find_by_child_id::<CarePlan>(&child_id))
}

pub async fn get_plan<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<CarePlan>, ApiError> {
    info!("GET /api/care-plans/{id}");
    state
        .store
        .find_by_id::<CarePlan>(&id)
        .map(Json)
        .ok_or(ApiError::NotFound("Care plan"))
}

/// Create a plan with AI-generated tasks. The generation itself never
/// fails (the AI service falls back to fixed content), so a valid child
/// always gets a populated plan.
pub async fn create_plan<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<CreateCarePlanRequest>,
) -> Result<(StatusCode, Json<CarePlan>), ApiError> {
    info!("POST /api/care-plans - title: {}", request.title);

    let Some(child) = state.store.find_by_id::<Child>(&request.child_id) else {
        return Err(ApiError::NotFound("Child"));
    };

    let suggestion = state
        .ai
        .care_plan(&child, request.specific_needs.as_deref().unwrap_or(""))
        .await;

    let now = Utc::now();
    let plan = CarePlan {
        id: Uuid::new_v4().to_string(),
        child_id: child.id,
        title: request.title,
        description: request
            .description
            .unwrap_or_else(|| "AI-generated care plan".to_string()),
        tasks: care_plans::tasks_from_suggestion(&suggestion, now.date_naive()),
        ai_generated: true,
        created_at: now,
        updated_at: now,
    };
    let plan = state
        .store
        .create(plan)
        .map_err(|e| ApiError::internal("Failed to create care plan", e))?;

    Ok((StatusCode::CREATED, Json(plan)))
}

pub async fn update_plan<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(patch): AppJson<Map<String, Value>>,
) -> Result<Json<CarePlan>, ApiError> {
    info!("PUT /api/care-plans/{id}");
    state
        .store
        .update::<CarePlan>(&id, patch)
        .map_err(|e| ApiError::internal("Failed to update care plan", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Care plan"))
}

pub async fn delete_plan<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("DELETE /api/care-plans/{id}");
    let existed = state
        .store
        .delete::<CarePlan>(&id)
        .map_err(|e| ApiError::internal("Failed to delete care plan", e))?;
    if !existed {
        return Err(ApiError::NotFound("Care plan"));
    }
    Ok(Json(MessageResponse {
        message: "Care plan deleted successfully".to_string(),
    }))
}

/// Merge a partial update into one task. `completedAt` is stamped only
/// when this patch sets `completed` to true and cleared otherwise.
pub async fn update_task<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path((id, task_id)): Path<(String, String)>,
    AppJson(request): AppJson<UpdateTaskRequest>,
) -> Result<Json<CarePlan>, ApiError> {
    info!("PATCH /api/care-plans/{id}/tasks/{task_id}");

    let Some(mut plan) = state.store.find_by_id::<CarePlan>(&id) else {
        return Err(ApiError::NotFound("Care plan"));
    };
    let Some(task) = plan.tasks.iter_mut().find(|task| task.id == task_id) else {
        return Err(ApiError::NotFound("Task"));
    };

    if let Some(title) = request.title {
        task.title = title;
    }
    if let Some(completed) = request.completed {
        task.completed = completed;
    }
    if let Some(due_date) = request.due_date {
        task.due_date = due_date;
    }
    task.completed_at = if request.completed == Some(true) {
        Some(Utc::now())
    } else {
        None
    };

    save_tasks(&state, &id, &plan).await
}

pub async fn add_task<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(request): AppJson<AddTaskRequest>,
) -> Result<(StatusCode, Json<CarePlan>), ApiError> {
    info!("POST /api/care-plans/{id}/tasks");

    let Some(mut plan) = state.store.find_by_id::<CarePlan>(&id) else {
        return Err(ApiError::NotFound("Care plan"));
    };

    let due_date = request.due_date.unwrap_or_else(|| Utc::now().date_naive());
    plan.tasks.push(care_plans::new_task(&request.title, due_date));

    let updated = save_tasks(&state, &id, &plan).await?;
    Ok((StatusCode::CREATED, updated))
}

/// Removing an unknown task id leaves the plan unchanged.
pub async fn delete_task<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path((id, task_id)): Path<(String, String)>,
) -> Result<Json<CarePlan>, ApiError> {
    info!("DELETE /api/care-plans/{id}/tasks/{task_id}");

    let Some(mut plan) = state.store.find_by_id::<CarePlan>(&id) else {
        return Err(ApiError::NotFound("Care plan"));
    };
    plan.tasks.retain(|task| task.id != task_id);

    save_tasks(&state, &id, &plan).await
}

pub async fn regenerate_plan<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    AppJson(request): AppJson<RegeneratePlanRequest>,
) -> Result<Json<CarePlan>, ApiError> {
    info!("POST /api/care-plans/{id}/regenerate");

    let Some(mut plan) = state.store.find_by_id::<CarePlan>(&id) else {
        return Err(ApiError::NotFound("Care plan"));
    };
    let Some(child) = state.store.find_by_id::<Child>(&plan.child_id) else {
        return Err(ApiError::NotFound("Child"));
    };

    let suggestion = state
        .ai
        .care_plan(&child, request.specific_needs.as_deref().unwrap_or(""))
        .await;
    plan.tasks = care_plans::tasks_from_suggestion(&suggestion, Utc::now().date_naive());

    save_tasks(&state, &id, &plan).await
}

/// Write the plan's task list back through the merge-update so the
/// `updatedAt` stamp refreshes.
async fn save_tasks<S: DocumentStore>(
    state: &AppState<S>,
    id: &str,
    plan: &CarePlan,
) -> Result<Json<CarePlan>, ApiError> {
    let tasks = serde_json::to_value(&plan.tasks)
        .map_err(|e| ApiError::internal("Failed to update task", e))?;
    let mut patch = Map::new();
    patch.insert("tasks".to_string(), tasks);
    state
        .store
        .update::<CarePlan>(id, patch)
        .map_err(|e| ApiError::internal("Failed to update task", e))?
        .map(Json)
        .ok_or(ApiError::NotFound("Care plan"))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use shared::{CreateChildRequest, Gender};
    use tempfile::tempdir;

    use super::*;
    use crate::routes::children::create_child;
    use crate::routes::test_support;

    async fn seeded_plan(state: &AppState<crate::storage::JsonStore>) -> CarePlan {
        let (_, Json(child)) = create_child(
            State(state.clone()),
            AppJson(CreateChildRequest {
                name: "Ava".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(),
                gender: Gender::Female,
                parent_id: "p1".to_string(),
                medical_history: None,
            }),
        )
        .await
        .unwrap();

        let (_, Json(plan)) = create_plan(
            State(state.clone()),
            AppJson(CreateCarePlanRequest {
                child_id: child.id,
                title: "Toddler plan".to_string(),
                description: None,
                specific_needs: None,
            }),
        )
        .await
        .unwrap();
        plan
    }

    #[tokio::test]
    async fn create_populates_tasks_from_the_fallback_suggestion() {
        let dir = tempdir().unwrap();
        let state = test_support::state(&dir);
        let plan = seeded_plan(&state).await;

        // Fallback suggestion: 2 routine + 2 monitoring items.
        assert_eq!(plan.tasks.len(), 4);
        assert!(plan.ai_generated);
        assert_eq!(plan.description, "AI-generated care plan");
        assert!(plan.tasks.iter().all(|t| !t.completed));
    }

    #[tokio::test]
    async fn create_for_missing_child_is_not_found() {
        let dir = tempdir().unwrap();
        let state = test_support::state(&dir);

        let err = create_plan(
            State(state),
            AppJson(CreateCarePlanRequest {
                child_id: "nope".to_string(),
                title: "Plan".to_string(),
                description: None,
                specific_needs: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Child")));
    }

    #[tokio::test]
    async fn task_toggle_sets_and_clears_completed_at() {
        let dir = tempdir().unwrap();
        let state = test_support::state(&dir);
        let plan = seeded_plan(&state).await;
        let task_id = plan.tasks[0].id.clone();

        let Json(updated) = update_task(
            State(state.clone()),
            Path((plan.id.clone(), task_id.clone())),
            AppJson(UpdateTaskRequest {
                title: None,
                completed: Some(true),
                due_date: None,
            }),
        )
        .await
        .unwrap();
        let task = updated.tasks.iter().find(|t| t.id == task_id).unwrap();
        assert!(task.completed);
        assert!(task.completed_at.is_some());
        assert!(updated.updated_at > plan.updated_at);

        let Json(reverted) = update_task(
            State(state),
            Path((plan.id, task_id.clone())),
            AppJson(UpdateTaskRequest {
                title: None,
                completed: Some(false),
                due_date: None,
            }),
        )
        .await
        .unwrap();
        let task = reverted.tasks.iter().find(|t| t.id == task_id).unwrap();
        assert!(!task.completed);
        assert!(task.completed_at.is_none());
    }

    #[tokio::test]
    async fn unknown_task_is_not_found() {
        let dir = tempdir().unwrap();
        let state = test_support::state(&dir);
        let plan = seeded_plan(&state).await;

        let err = update_task(
            State(state),
            Path((plan.id, "missing-task".to_string())),
            AppJson(UpdateTaskRequest {
                title: None,
                completed: Some(true),
                due_date: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound("Task")));
    }

    #[tokio::test]
    async fn add_and_delete_task_round_trip() {
        let dir = tempdir().unwrap();
        let state = test_support::state(&dir);
        let plan = seeded_plan(&state).await;
        let initial = plan.tasks.len();

        let (status, Json(with_new)) = add_task(
            State(state.clone()),
            Path(plan.id.clone()),
            AppJson(AddTaskRequest {
                title: "Brush teeth".to_string(),
                due_date: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(with_new.tasks.len(), initial + 1);
        let added = with_new.tasks.last().unwrap();
        assert_eq!(added.title, "Brush teeth");
        assert_eq!(added.due_date, Utc::now().date_naive());

        let Json(after_delete) = delete_task(
            State(state),
            Path((plan.id, added.id.clone())),
        )
        .await
        .unwrap();
        assert_eq!(after_delete.tasks.len(), initial);
    }

    #[tokio::test]
    async fn regenerate_replaces_the_task_list() {
        let dir = tempdir().unwrap();
        let state = test_support::state(&dir);
        let plan = seeded_plan(&state).await;
        let old_ids: Vec<String> = plan.tasks.iter().map(|t| t.id.clone()).collect();

        let Json(regenerated) = regenerate_plan(
            State(state),
            Path(plan.id),
            AppJson(RegeneratePlanRequest {
                specific_needs: Some("picky eater".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(regenerated.tasks.len(), 4);
        assert!(regenerated
            .tasks
            .iter()
            .all(|t| !old_ids.contains(&t.id)));
    }
}
