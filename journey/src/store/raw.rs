//! Wire shape of an authored record document, before validation.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::models::{
    DeviceStatus, Intervention, Member, MetricKind, MetricSample, WeekEntry,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub member: Member,
    pub weekly_timeline: Vec<WeekEntry>,
    #[serde(default)]
    pub metrics: BTreeMap<MetricKind, Vec<MetricSample>>,
    #[serde(default)]
    pub weekly_summaries: BTreeMap<u32, RawWeeklySummary>,
    #[serde(default)]
    pub member_questions: BTreeMap<u32, RawQuestionLog>,
    #[serde(default)]
    pub weekly_conversations: BTreeMap<u32, RawConversation>,
    pub wearable_status: DeviceStatus,
    #[serde(default)]
    pub interventions: Vec<Intervention>,
}

/// Summary body keyed by week. Missing adherence or event fall back to the
/// timeline entry of the same week.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeeklySummary {
    #[serde(default)]
    pub current_symptoms: Vec<String>,
    #[serde(default)]
    pub key_decisions: Vec<String>,
    #[serde(default)]
    pub major_event: Option<String>,
    #[serde(default)]
    pub adherence_level: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestionLog {
    #[serde(default)]
    pub questions: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConversation {
    pub rationale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_keyed_maps_accept_string_keys() {
        let json = r#"{
            "member": {"name": "Ana", "memberId": "M-1", "startDate": "2025-01-01", "totalWeeks": 2},
            "weeklyTimeline": [
                {"week": 1, "adherenceLevel": 0.9},
                {"week": 2, "adherenceLevel": 0.8, "majorEvent": "Trip"}
            ],
            "metrics": {"adherence": [{"week": 1, "value": 0.9}]},
            "weeklySummaries": {"2": {"currentSymptoms": ["cough"], "keyDecisions": ["rest"]}},
            "memberQuestions": {"1": {"questions": ["why?"], "summary": "asked why"}},
            "wearableStatus": {"status": "inactive", "lastUpdate": "yesterday"}
        }"#;

        let raw: RawRecord = serde_json::from_str(json).expect("deserialize");
        assert_eq!(raw.member.total_weeks, 2);
        assert_eq!(raw.metrics[&MetricKind::Adherence].len(), 1);
        assert_eq!(raw.weekly_summaries[&2].current_symptoms, vec!["cough"]);
        assert!(raw.weekly_summaries[&2].adherence_level.is_none());
        assert_eq!(raw.member_questions[&1].summary, "asked why");
        assert!(raw.weekly_conversations.is_empty());
        assert!(raw.interventions.is_empty());
    }
}
