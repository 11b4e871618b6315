//! Week detail DTOs for the v1 API.

use serde::Serialize;

use crate::models::DeviceState;
use crate::timeline::WeekView;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummaryResponse {
    pub current_symptoms: Vec<String>,
    pub key_decisions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_event: Option<String>,
    pub adherence_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum V1DeviceState {
    Active,
    Inactive,
    Error,
}

impl From<DeviceState> for V1DeviceState {
    fn from(state: DeviceState) -> Self {
        match state {
            DeviceState::Active => Self::Active,
            DeviceState::Inactive => Self::Inactive,
            DeviceState::Error => Self::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatusResponse {
    pub status: V1DeviceState,
    /// Derived from the distance to the latest tracked week, e.g. `"14 days ago"`.
    pub last_sync: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_issues: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct QuestionLogResponse {
    pub questions: Vec<String>,
    pub summary: String,
}

/// Response body for `GET /v1/weeks/{week}`. Weeks without authored entries
/// carry the documented defaults.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekViewResponse {
    pub week: u32,
    pub adherence_level: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_event: Option<String>,
    pub summary: WeekSummaryResponse,
    pub device_status: DeviceStatusResponse,
    pub questions: QuestionLogResponse,
    /// Care-team conversation summary for the week.
    pub conversation: String,
}

impl From<WeekView> for WeekViewResponse {
    fn from(view: WeekView) -> Self {
        Self {
            week: view.week,
            adherence_level: view.entry.adherence_level,
            major_event: view.entry.major_event,
            summary: WeekSummaryResponse {
                current_symptoms: view.summary.current_symptoms,
                key_decisions: view.summary.key_decisions,
                major_event: view.summary.major_event,
                adherence_level: view.summary.adherence_level,
            },
            device_status: DeviceStatusResponse {
                status: view.device_status.status.into(),
                last_sync: view.device_status.last_sync,
                battery_level: view.device_status.battery_level,
                detected_issues: view.device_status.detected_issues,
            },
            questions: QuestionLogResponse {
                questions: view.questions.questions,
                summary: view.questions.summary,
            },
            conversation: view.conversation.rationale,
        }
    }
}
