//! Read-only record store.
//!
//! The store is built once from an authored record document, validated, gap
//! filled and then shared (behind an `Arc`) by every session without locking.

mod bundled;
mod fill;
mod raw;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::error::{JourneyError, Result};
use crate::models::{
    DeviceStatus, Intervention, Member, MemberQuestionLog, MetricKind, MetricSample, MetricSeries,
    WeekEntry, WeeklyConversation, WeeklySummary,
};

pub use bundled::{bundled_record, DEMO_RECORD};
pub use fill::fill_gaps;
pub use raw::{RawConversation, RawQuestionLog, RawRecord, RawWeeklySummary};

#[derive(Debug, Clone)]
pub struct RecordStore {
    member: Member,
    timeline: Vec<WeekEntry>,
    metrics: BTreeMap<MetricKind, MetricSeries>,
    summaries: BTreeMap<u32, WeeklySummary>,
    questions: BTreeMap<u32, MemberQuestionLog>,
    conversations: BTreeMap<u32, WeeklyConversation>,
    device_status: DeviceStatus,
    interventions: Vec<Intervention>,
}

impl RecordStore {
    /// Load from `path`, or from the bundled demo record when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::demo(),
        }
    }

    pub fn demo() -> Result<Self> {
        Self::from_json_str(&bundled_record(DEMO_RECORD)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let store = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            member = %store.member.member_id,
            total_weeks = store.member.total_weeks,
            "Loaded journey record"
        );
        Ok(store)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawRecord = serde_json::from_str(text)?;
        Self::from_raw(raw)
    }

    /// Validate an authored record and normalize it into a store.
    pub fn from_raw(raw: RawRecord) -> Result<Self> {
        let member = raw.member;
        let total_weeks = member.total_weeks;

        if member.name.trim().is_empty() {
            return Err(JourneyError::Validation(
                "Member name cannot be empty".to_string(),
            ));
        }
        if total_weeks == 0 {
            return Err(JourneyError::Validation(
                "Member must track at least one week".to_string(),
            ));
        }

        let timeline = validate_timeline(raw.weekly_timeline, total_weeks)?;

        let mut metrics = BTreeMap::new();
        for metric in MetricKind::ALL {
            let authored = raw.metrics.get(&metric).map(Vec::as_slice).unwrap_or(&[]);
            validate_samples(metric, authored, total_weeks)?;
            metrics.insert(metric, fill_gaps(metric, authored, &timeline, total_weeks));
        }

        let mut summaries = BTreeMap::new();
        for (week, body) in raw.weekly_summaries {
            let entry = timeline_entry(&timeline, week, total_weeks, "weekly summary")?;
            let adherence_level = match body.adherence_level {
                Some(level) => checked_level(level, week)?,
                None => entry.adherence_level,
            };
            summaries.insert(
                week,
                WeeklySummary {
                    week,
                    current_symptoms: body.current_symptoms,
                    key_decisions: body.key_decisions,
                    major_event: body.major_event.or_else(|| entry.major_event.clone()),
                    adherence_level,
                },
            );
        }

        let mut questions = BTreeMap::new();
        for (week, log) in raw.member_questions {
            ensure_in_range(week, total_weeks, "question log")?;
            questions.insert(
                week,
                MemberQuestionLog {
                    week,
                    questions: log.questions,
                    summary: log.summary,
                },
            );
        }

        let mut conversations = BTreeMap::new();
        for (week, conversation) in raw.weekly_conversations {
            ensure_in_range(week, total_weeks, "conversation")?;
            conversations.insert(
                week,
                WeeklyConversation {
                    week,
                    rationale: conversation.rationale,
                },
            );
        }

        for intervention in &raw.interventions {
            ensure_in_range(intervention.week, total_weeks, "intervention")?;
        }

        Ok(Self {
            member,
            timeline,
            metrics,
            summaries,
            questions,
            conversations,
            device_status: raw.wearable_status,
            interventions: raw.interventions,
        })
    }

    pub fn member(&self) -> &Member {
        &self.member
    }

    pub fn total_weeks(&self) -> u32 {
        self.member.total_weeks
    }

    pub fn timeline(&self) -> &[WeekEntry] {
        &self.timeline
    }

    /// Timeline row for `week`. Dense by construction for in-range weeks.
    pub fn entry(&self, week: u32) -> Option<&WeekEntry> {
        week.checked_sub(1)
            .and_then(|index| self.timeline.get(index as usize))
    }

    pub fn series(&self, metric: MetricKind) -> Option<&MetricSeries> {
        self.metrics.get(&metric)
    }

    pub fn summary(&self, week: u32) -> Option<&WeeklySummary> {
        self.summaries.get(&week)
    }

    pub fn questions(&self, week: u32) -> Option<&MemberQuestionLog> {
        self.questions.get(&week)
    }

    pub fn conversation(&self, week: u32) -> Option<&WeeklyConversation> {
        self.conversations.get(&week)
    }

    /// Authored conversations in week order.
    pub fn conversations(&self) -> impl Iterator<Item = &WeeklyConversation> {
        self.conversations.values()
    }

    pub fn device_status(&self) -> &DeviceStatus {
        &self.device_status
    }

    pub fn interventions(&self) -> &[Intervention] {
        &self.interventions
    }
}

fn validate_timeline(mut timeline: Vec<WeekEntry>, total_weeks: u32) -> Result<Vec<WeekEntry>> {
    timeline.sort_by_key(|entry| entry.week);

    if timeline.len() != total_weeks as usize {
        return Err(JourneyError::Validation(format!(
            "Timeline has {} entries but member tracks {} weeks",
            timeline.len(),
            total_weeks
        )));
    }

    for (index, entry) in timeline.iter_mut().enumerate() {
        let expected = index as u32 + 1;
        if entry.week != expected {
            return Err(JourneyError::Validation(format!(
                "Timeline must cover weeks 1..={total_weeks} exactly once; expected week {expected}, found {}",
                entry.week
            )));
        }
        entry.adherence_level = checked_level(entry.adherence_level, entry.week)?;
    }

    Ok(timeline)
}

fn validate_samples(metric: MetricKind, samples: &[MetricSample], total_weeks: u32) -> Result<()> {
    let mut seen = BTreeSet::new();
    for sample in samples {
        ensure_in_range(sample.week, total_weeks, metric.as_str())?;

        if !seen.insert(sample.week) {
            return Err(JourneyError::Validation(format!(
                "Metric {metric} has more than one sample for week {}",
                sample.week
            )));
        }

        let finite = sample.value.is_finite() && sample.secondary.map_or(true, f64::is_finite);
        if !finite {
            return Err(JourneyError::Validation(format!(
                "Metric {metric} has a non-finite value at week {}",
                sample.week
            )));
        }
    }
    Ok(())
}

fn timeline_entry<'a>(
    timeline: &'a [WeekEntry],
    week: u32,
    total_weeks: u32,
    what: &str,
) -> Result<&'a WeekEntry> {
    ensure_in_range(week, total_weeks, what)?;
    timeline
        .get(week as usize - 1)
        .ok_or_else(|| JourneyError::Internal(format!("Timeline has no entry for week {week}")))
}

fn ensure_in_range(week: u32, total_weeks: u32, what: &str) -> Result<()> {
    if (1..=total_weeks).contains(&week) {
        Ok(())
    } else {
        Err(JourneyError::Validation(format!(
            "{what} references week {week} outside 1..={total_weeks}"
        )))
    }
}

/// Adherence levels are clamped into [0, 1]; non-finite levels are rejected.
fn checked_level(level: f64, week: u32) -> Result<f64> {
    if !level.is_finite() {
        return Err(JourneyError::Validation(format!(
            "Adherence level for week {week} is not a number"
        )));
    }
    Ok(level.clamp(0.0, 1.0))
}
