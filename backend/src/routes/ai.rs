//! AI advisory routes. The structured endpoints always answer 200 with
//! either model output or fallback content; chat and daily-summary have
//! no fallback and surface upstream failures as 500s.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use shared::{
    AiInsight, CarePlan, CarePlanSuggestion, ChatRequest, ChatResponse, Child,
    DailySummaryRequest, DailySummaryResponse, HealthAnalysisRequest, HealthAnalysisResponse,
    HealthRecord, MessageResponse, Reminder, SuggestCarePlanRequest, TipRequest, TipResponse,
};
use tracing::info;

use super::AppState;
use crate::error::{ApiError, AppJson};
use crate::storage::DocumentStore;

pub fn router<S: DocumentStore>() -> Router<AppState<S>> {
    Router::new()
        .route("/tips", post(generate_tip::<S>))
        .route("/insights", post(generate_health_analysis::<S>))
        .route("/care-plan", post(suggest_care_plan::<S>))
        .route("/chat", post(chat::<S>))
        .route(
            "/insights/:id",
            get(insights_for_child::<S>).delete(delete_insight::<S>),
        )
        .route("/daily-summary", post(daily_summary::<S>))
}

pub async fn generate_tip<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<TipRequest>,
) -> Result<Json<TipResponse>, ApiError> {
    info!("POST /api/ai/tips - child: {}", request.child_id);

    let Some(child) = state.store.find_by_id::<Child>(&request.child_id) else {
        return Err(ApiError::NotFound("Child"));
    };

    let tip = state
        .ai
        .personalized_tip(&child, request.context.as_deref().unwrap_or(""))
        .await;

    let insight = AiInsight::new(
        &child.id,
        "personalized_tip",
        "Personalized Health Tip",
        tip.tip.clone(),
        0.85,
        Utc::now(),
    );
    let insight = state
        .store
        .create(insight)
        .map_err(|e| ApiError::internal("Failed to generate AI tip", e))?;

    Ok(Json(TipResponse { tip, insight }))
}

pub async fn generate_health_analysis<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<HealthAnalysisRequest>,
) -> Result<Json<HealthAnalysisResponse>, ApiError> {
    info!("POST /api/ai/insights - child: {}", request.child_id);

    let Some(child) = state.store.find_by_id::<Child>(&request.child_id) else {
        return Err(ApiError::NotFound("Child"));
    };

    let records = state.store.find_by_child_id::<HealthRecord>(&child.id);
    let analysis = state.ai.health_insight(&child, &records).await;

    let content = serde_json::to_string(&analysis)
        .map_err(|e| ApiError::internal("Failed to generate health insights", e))?;
    let insight = AiInsight::new(
        &child.id,
        "health_analysis",
        "Health Analysis",
        content,
        0.8,
        Utc::now(),
    );
    let insight = state
        .store
        .create(insight)
        .map_err(|e| ApiError::internal("Failed to generate health insights", e))?;

    Ok(Json(HealthAnalysisResponse { analysis, insight }))
}

/// One-shot plan suggestion; nothing is persisted.
pub async fn suggest_care_plan<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<SuggestCarePlanRequest>,
) -> Result<Json<CarePlanSuggestion>, ApiError> {
    info!("POST /api/ai/care-plan - child: {}", request.child_id);

    let Some(child) = state.store.find_by_id::<Child>(&request.child_id) else {
        return Err(ApiError::NotFound("Child"));
    };
    let suggestion = state
        .ai
        .care_plan(&child, request.specific_needs.as_deref().unwrap_or(""))
        .await;
    Ok(Json(suggestion))
}

pub async fn chat<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    info!("POST /api/ai/chat");

    let child = request
        .child_id
        .as_deref()
        .and_then(|id| state.store.find_by_id::<Child>(id));

    let response = state
        .ai
        .chat(child.as_ref(), &request.message, request.context.as_deref())
        .await
        .map_err(|e| ApiError::internal("Failed to process chat message", e))?;

    Ok(Json(ChatResponse {
        response,
        timestamp: Utc::now(),
    }))
}

pub async fn insights_for_child<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(child_id): Path<String>,
) -> Json<Vec<AiInsight>> {
    info!("GET /api/ai/insights/{child_id}");
    Json(state.store.find_by_child_id::<AiInsight>(&child_id))
}

pub async fn delete_insight<S: DocumentStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    info!("DELETE /api/ai/insights/{id}");
    let existed = state
        .store
        .delete::<AiInsight>(&id)
        .map_err(|e| ApiError::internal("Failed to delete AI insight", e))?;
    if !existed {
        return Err(ApiError::NotFound("AI insight"));
    }
    Ok(Json(MessageResponse {
        message: "AI insight deleted successfully".to_string(),
    }))
}

pub async fn daily_summary<S: DocumentStore>(
    State(state): State<AppState<S>>,
    AppJson(request): AppJson<DailySummaryRequest>,
) -> Result<Json<DailySummaryResponse>, ApiError> {
    info!("POST /api/ai/daily-summary - child: {}", request.child_id);

    let Some(child) = state.store.find_by_id::<Child>(&request.child_id) else {
        return Err(ApiError::NotFound("Child"));
    };

    let records = state.store.find_by_child_id::<HealthRecord>(&child.id);
    let recent = &records[records.len().saturating_sub(5)..];
    let reminders: Vec<Reminder> = state
        .store
        .find_by_child_id::<Reminder>(&child.id)
        .into_iter()
        .filter(|reminder| reminder.is_active)
        .collect();
    let plans = state.store.find_by_child_id::<CarePlan>(&child.id);

    let summary = state
        .ai
        .daily_summary(&child, recent, &reminders, &plans)
        .await
        .map_err(|e| ApiError::internal("Failed to generate daily summary", e))?;

    Ok(Json(DailySummaryResponse {
        summary,
        timestamp: Utc::now(),
    }))
}
