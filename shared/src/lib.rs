//! Shared data types for the parent-copilot app.
//!
//! Everything that crosses the wire between the client and the backend —
//! entities, request/response payloads, and the structured AI content
//! blocks — lives here. All types serialize with camelCase field names so
//! the REST bodies and the persisted data file use the same JSON shape.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Child gender, a closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        };
        f.write_str(label)
    }
}

/// Lifecycle status of a health record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthRecordStatus {
    Scheduled,
    Completed,
    Cancelled,
}

/// How often a reminder repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Once,
    Daily,
    Weekly,
    Monthly,
}

/// Notification settings attached to a parent account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentPreferences {
    pub notifications: bool,
    pub reminder_frequency: String,
    pub language: String,
}

impl Default for ParentPreferences {
    fn default() -> Self {
        Self {
            notifications: true,
            reminder_frequency: "daily".to_string(),
            language: "en".to_string(),
        }
    }
}

/// A parent account. Stored alongside the other collections but has no
/// REST surface of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub preferences: ParentPreferences,
    pub created_at: DateTime<Utc>,
}

/// Allergies, conditions and medications as free-text lists.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalHistory {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
}

/// Height/weight tracking with a last-updated stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicalMilestones {
    pub height: f64,
    pub weight: f64,
    pub last_updated: DateTime<Utc>,
}

/// Free-text cognitive milestones with a last-updated stamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveMilestones {
    #[serde(default)]
    pub milestones: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevelopmentMilestones {
    pub physical: PhysicalMilestones,
    pub cognitive: CognitiveMilestones,
}

impl DevelopmentMilestones {
    /// Zeroed milestones for a newly created profile.
    pub fn starting(now: DateTime<Utc>) -> Self {
        Self {
            physical: PhysicalMilestones {
                height: 0.0,
                weight: 0.0,
                last_updated: now,
            },
            cognitive: CognitiveMilestones {
                milestones: Vec::new(),
                last_updated: now,
            },
        }
    }
}

/// A child profile. References its owning parent by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub parent_id: String,
    #[serde(default)]
    pub medical_history: MedicalHistory,
    pub development_milestones: DevelopmentMilestones,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A health event (checkup, vaccination, ...) belonging to one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthRecord {
    pub id: String,
    pub child_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: NaiveDate,
    pub status: HealthRecordStatus,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled or recurring reminder belonging to one child.
///
/// `time` is a wall-clock "HH:MM" string; `date` is optional — a dateless
/// reminder is treated as recurring and is always in the upcoming window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub child_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub notes: String,
    pub is_active: bool,
    #[serde(default)]
    pub last_triggered: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// One actionable item inside a care plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// An ordered list of care tasks for one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlan {
    pub id: String,
    pub child_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<CarePlanTask>,
    pub ai_generated: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A persisted piece of AI-generated advice for one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiInsight {
    pub id: String,
    pub child_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    /// Free text; analysis insights hold serialized structured data here.
    pub content: String,
    /// Caller-chosen constant in [0, 1], not computed.
    pub confidence: f64,
    pub created_at: DateTime<Utc>,
}

impl AiInsight {
    pub fn new(
        child_id: &str,
        kind: &str,
        title: &str,
        content: String,
        confidence: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            kind: kind.to_string(),
            title: title.to_string(),
            content,
            confidence,
            created_at: now,
        }
    }
}

/// A child together with every record that references it, assembled for
/// single-request convenience.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildWithDetails {
    #[serde(flatten)]
    pub child: Child,
    pub health_records: Vec<HealthRecord>,
    pub reminders: Vec<Reminder>,
    pub care_plans: Vec<CarePlan>,
    pub ai_insights: Vec<AiInsight>,
}

// --- structured AI content ---

/// Personalized advice block returned by the tip endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedTip {
    pub tip: String,
    pub milestone: String,
    pub safety: String,
    pub nutrition: String,
}

/// Care plan suggestion produced by the model, grouped by concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarePlanSuggestion {
    pub daily_routine: Vec<String>,
    pub health_monitoring: Vec<String>,
    pub activities: Vec<String>,
    pub safety: Vec<String>,
    pub nutrition: Vec<String>,
}

/// Health trend analysis produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthInsight {
    pub trends: String,
    pub concerns: String,
    pub recommendations: String,
    pub milestones: String,
}

// --- request payloads ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChildRequest {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub parent_id: String,
    #[serde(default)]
    pub medical_history: Option<MedicalHistory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthRecordRequest {
    pub child_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub status: Option<HealthRecordStatus>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub child_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarePlanRequest {
    pub child_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub specific_needs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTaskRequest {
    pub title: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Partial update for a single care plan task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegeneratePlanRequest {
    #[serde(default)]
    pub specific_needs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInsightRequest {
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipRequest {
    pub child_id: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAnalysisRequest {
    pub child_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestCarePlanRequest {
    pub child_id: String,
    #[serde(default)]
    pub specific_needs: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub child_id: Option<String>,
    pub message: String,
    #[serde(default)]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryRequest {
    pub child_id: String,
}

// --- response payloads ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TipResponse {
    pub tip: PersonalizedTip,
    pub insight: AiInsight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthAnalysisResponse {
    pub analysis: HealthInsight,
    pub insight: AiInsight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryResponse {
    pub summary: String,
    pub timestamp: DateTime<Utc>,
}

/// Generic `{message}` acknowledgement for delete-style operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Service health check body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    pub message: String,
}
