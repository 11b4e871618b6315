//! Member and timeline DTOs for the v1 API.

use serde::Serialize;

use crate::models;

/// Response body for `GET /v1/member`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub name: String,
    pub member_id: String,
    /// Enrollment date, `YYYY-MM-DD`.
    pub start_date: String,
    pub total_weeks: u32,
}

impl From<&models::Member> for MemberResponse {
    fn from(member: &models::Member) -> Self {
        Self {
            name: member.name.clone(),
            member_id: member.member_id.clone(),
            start_date: member.start_date.format("%Y-%m-%d").to_string(),
            total_weeks: member.total_weeks,
        }
    }
}

/// One row of `GET /v1/timeline`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntryResponse {
    pub week: u32,
    /// Fraction in `[0, 1]`.
    pub adherence_level: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_event: Option<String>,
}

impl From<&models::WeekEntry> for TimelineEntryResponse {
    fn from(entry: &models::WeekEntry) -> Self {
        Self {
            week: entry.week,
            adherence_level: entry.adherence_level,
            major_event: entry.major_event.clone(),
        }
    }
}
