//! # AI Advisory Service
//!
//! Builds prompts from entity data, submits them to a text-generation
//! model behind the [`TextModel`] trait, and guarantees a usable response:
//! the structured endpoints fall back to fixed generic advice when the
//! model errors, and to the raw reply text when the reply is not the JSON
//! shape that was asked for. Chat and summary calls have no fallback and
//! surface their errors to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use shared::{CarePlan, CarePlanSuggestion, Child, HealthInsight, HealthRecord, PersonalizedTip, Reminder};
use thiserror::Error;
use tracing::warn;

pub mod gemini;
pub mod prompts;

/// Errors from the underlying text-generation model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("no API key configured for the generative model")]
    MissingApiKey,
    #[error("request to the generative model failed: {0}")]
    Network(String),
    #[error("generative model returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("could not decode the model response: {0}")]
    Decode(String),
    #[error("generative model returned an empty response")]
    EmptyResponse,
}

/// An opaque text-completion service: one prompt in, one reply out.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;
}

/// The advisory service used by the routes. Cheap to clone.
#[derive(Clone)]
pub struct AiService {
    model: Arc<dyn TextModel>,
}

impl AiService {
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self { model }
    }

    /// A personalized advice block for one child. Never fails: model
    /// errors substitute the fixed fallback tip, an unparsable reply is
    /// passed through as the tip text.
    pub async fn personalized_tip(&self, child: &Child, context: &str) -> PersonalizedTip {
        let prompt = prompts::personalized_tip(child, context, Utc::now().date_naive());
        match self.model.generate(&prompt).await {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(tip) => tip,
                Err(_) => PersonalizedTip {
                    tip: text,
                    milestone: "Continue monitoring developmental progress".to_string(),
                    safety: "Ensure childproofing is up to date".to_string(),
                    nutrition: "Maintain balanced meals with fruits and vegetables".to_string(),
                },
            },
            Err(e) => {
                warn!("tip generation failed, substituting fallback advice: {e}");
                fallback_tip()
            }
        }
    }

    /// A structured care plan suggestion. Same fallback scheme as
    /// [`Self::personalized_tip`].
    pub async fn care_plan(&self, child: &Child, specific_needs: &str) -> CarePlanSuggestion {
        let prompt = prompts::care_plan(child, specific_needs, Utc::now().date_naive());
        match self.model.generate(&prompt).await {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| CarePlanSuggestion {
                daily_routine: strings(&["Regular meal times", "Adequate sleep", "Play time"]),
                health_monitoring: strings(&[
                    "Track growth",
                    "Monitor development",
                    "Regular checkups",
                ]),
                activities: strings(&[
                    "Age-appropriate play",
                    "Reading time",
                    "Physical activity",
                ]),
                safety: strings(&[
                    "Childproof environment",
                    "Supervision",
                    "Emergency preparedness",
                ]),
                nutrition: strings(&[
                    "Balanced meals",
                    "Adequate hydration",
                    "Limit processed foods",
                ]),
            }),
            Err(e) => {
                warn!("care plan generation failed, substituting fallback plan: {e}");
                fallback_care_plan()
            }
        }
    }

    /// A health-trend analysis over the child's records. Same fallback
    /// scheme as [`Self::personalized_tip`].
    pub async fn health_insight(&self, child: &Child, records: &[HealthRecord]) -> HealthInsight {
        let prompt = prompts::health_insight(child, records, Utc::now().date_naive());
        match self.model.generate(&prompt).await {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|_| HealthInsight {
                trends: "Continue monitoring health metrics".to_string(),
                concerns: "No immediate concerns identified".to_string(),
                recommendations: "Maintain current care routine".to_string(),
                milestones: "Watch for age-appropriate developmental progress".to_string(),
            }),
            Err(e) => {
                warn!("health insight generation failed, substituting fallback: {e}");
                fallback_health_insight()
            }
        }
    }

    /// Free-form assistant reply. No fallback; the caller surfaces the
    /// error.
    pub async fn chat(
        &self,
        child: Option<&Child>,
        message: &str,
        context: Option<&str>,
    ) -> Result<String, ModelError> {
        let prompt = prompts::chat(child, message, context, Utc::now().date_naive());
        self.model.generate(&prompt).await
    }

    /// Daily summary over the child's records, reminders and plans. No
    /// fallback; the caller surfaces the error.
    pub async fn daily_summary(
        &self,
        child: &Child,
        recent_records: &[HealthRecord],
        active_reminders: &[Reminder],
        care_plans: &[CarePlan],
    ) -> Result<String, ModelError> {
        let prompt = prompts::daily_summary(
            child,
            recent_records,
            active_reminders,
            care_plans,
            Utc::now().date_naive(),
        );
        self.model.generate(&prompt).await
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fallback_tip() -> PersonalizedTip {
    PersonalizedTip {
        tip: "Continue providing love, care, and attention to your child's development."
            .to_string(),
        milestone: "Monitor age-appropriate developmental milestones".to_string(),
        safety: "Ensure a safe environment for exploration and play".to_string(),
        nutrition: "Provide balanced nutrition with age-appropriate portions".to_string(),
    }
}

fn fallback_care_plan() -> CarePlanSuggestion {
    CarePlanSuggestion {
        daily_routine: strings(&["Maintain consistent schedule", "Ensure adequate rest"]),
        health_monitoring: strings(&["Regular health checkups", "Monitor growth"]),
        activities: strings(&["Encourage play and exploration", "Reading and learning"]),
        safety: strings(&["Maintain safe environment", "Supervise activities"]),
        nutrition: strings(&["Provide balanced nutrition", "Encourage healthy eating"]),
    }
}

fn fallback_health_insight() -> HealthInsight {
    HealthInsight {
        trends: "Health monitoring is on track".to_string(),
        concerns: "Continue regular health monitoring".to_string(),
        recommendations: "Maintain consistent care routine".to_string(),
        milestones: "Monitor developmental progress".to_string(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Returns the same reply for every prompt.
    pub struct CannedModel(pub String);

    #[async_trait]
    impl TextModel for CannedModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Ok(self.0.clone())
        }
    }

    /// Fails every call, as an unreachable upstream would.
    pub struct FailingModel;

    #[async_trait]
    impl TextModel for FailingModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            Err(ModelError::Network("connection refused".to_string()))
        }
    }

    pub fn canned(reply: &str) -> AiService {
        AiService::new(Arc::new(CannedModel(reply.to_string())))
    }

    pub fn failing() -> AiService {
        AiService::new(Arc::new(FailingModel))
    }
}
