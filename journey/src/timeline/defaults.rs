//! Named default constructors for weeks without authored entries.
//!
//! Each function is pure: the same inputs always produce the same value.

use crate::models::{
    DeviceStatus, MemberQuestionLog, WeekDeviceStatus, WeekEntry, WeeklyConversation,
    WeeklySummary,
};

pub const NO_DECISIONS: &str = "No specific decisions recorded for this week";
pub const NO_QUESTIONS: &str = "No questions recorded for this week.";
pub const NO_CONVERSATION: &str = "No specific conversation summary available for this week.";

pub fn default_summary(entry: &WeekEntry) -> WeeklySummary {
    WeeklySummary {
        week: entry.week,
        current_symptoms: Vec::new(),
        key_decisions: vec![NO_DECISIONS.to_string()],
        major_event: entry.major_event.clone(),
        adherence_level: entry.adherence_level.clamp(0.0, 1.0),
    }
}

pub fn default_question_log(week: u32) -> MemberQuestionLog {
    MemberQuestionLog {
        week,
        questions: Vec::new(),
        summary: NO_QUESTIONS.to_string(),
    }
}

pub fn default_conversation(week: u32) -> WeeklyConversation {
    WeeklyConversation {
        week,
        rationale: NO_CONVERSATION.to_string(),
    }
}

/// Sync descriptor derived from distance to the latest tracked week.
pub fn last_sync_label(weeks_behind: u32) -> String {
    match weeks_behind {
        0 => "Just now".to_string(),
        n => format!("{} days ago", u64::from(n) * 7),
    }
}

/// Week-specific view of the shared device snapshot.
pub fn device_status_for_week(device: &DeviceStatus, weeks_behind: u32) -> WeekDeviceStatus {
    WeekDeviceStatus {
        status: device.status,
        last_sync: last_sync_label(weeks_behind),
        battery_level: device.battery_level,
        detected_issues: device.detected_issues.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DeviceState;

    #[test]
    fn sync_label_counts_days() {
        assert_eq!(last_sync_label(0), "Just now");
        assert_eq!(last_sync_label(1), "7 days ago");
        assert_eq!(last_sync_label(31), "217 days ago");
    }

    #[test]
    fn default_summary_uses_timeline_entry() {
        let entry = WeekEntry {
            week: 3,
            adherence_level: 0.88,
            major_event: Some("Travel".to_string()),
        };
        let summary = default_summary(&entry);
        assert!(summary.current_symptoms.is_empty());
        assert_eq!(summary.key_decisions, vec![NO_DECISIONS]);
        assert_eq!(summary.adherence_level, 0.88);
        assert_eq!(summary.major_event.as_deref(), Some("Travel"));
        assert_eq!(default_summary(&entry), summary);
    }

    #[test]
    fn device_view_keeps_snapshot_fields() {
        let device = DeviceStatus {
            status: DeviceState::Error,
            last_update: "2 hours ago".to_string(),
            battery_level: Some(40),
            detected_issues: Some(vec!["Loose strap".to_string()]),
        };
        let view = device_status_for_week(&device, 2);
        assert_eq!(view.status, DeviceState::Error);
        assert_eq!(view.last_sync, "14 days ago");
        assert_eq!(view.battery_level, Some(40));
        assert_eq!(view.detected_issues, device.detected_issues);
    }
}
