use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The single tracked individual. Created once when the record is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    pub member_id: String,
    pub start_date: NaiveDate,
    pub total_weeks: u32,
}

impl Member {
    pub fn contains_week(&self, week: u32) -> bool {
        (1..=self.total_weeks).contains(&week)
    }

    /// Number of weeks between `week` and the latest tracked week.
    pub fn weeks_behind(&self, week: u32) -> u32 {
        self.total_weeks.saturating_sub(week)
    }
}

/// One row of the master timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekEntry {
    pub week: u32,
    pub adherence_level: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_event: Option<String>,
}
