use serde::{Deserialize, Serialize};

/// Authored or defaulted summary of a single week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub week: u32,
    pub current_symptoms: Vec<String>,
    pub key_decisions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_event: Option<String>,
    pub adherence_level: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceState {
    Active,
    Inactive,
    Error,
}

/// Wearable snapshot shared by every week of the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub status: DeviceState,
    pub last_update: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_issues: Option<Vec<String>>,
}

/// Device status as seen from one week of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekDeviceStatus {
    pub status: DeviceState,
    pub last_sync: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detected_issues: Option<Vec<String>>,
}

/// Verbatim member questions for a week plus a one-line digest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberQuestionLog {
    pub week: u32,
    pub questions: Vec<String>,
    pub summary: String,
}

/// Care-team conversation rationale for a week; the assistant's evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyConversation {
    pub week: u32,
    pub rationale: String,
}
