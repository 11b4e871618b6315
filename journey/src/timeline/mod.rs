//! Week Resolver: a total function from an in-range week number to everything
//! recorded (or defaulted) about that week.

mod defaults;

use serde::Serialize;

use crate::error::{JourneyError, Result};
use crate::models::{
    MemberQuestionLog, WeekDeviceStatus, WeekEntry, WeeklyConversation, WeeklySummary,
};
use crate::store::RecordStore;

pub use defaults::{
    default_conversation, default_question_log, default_summary, device_status_for_week,
    last_sync_label, NO_CONVERSATION, NO_DECISIONS, NO_QUESTIONS,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub week: u32,
    pub entry: WeekEntry,
    pub summary: WeeklySummary,
    pub device_status: WeekDeviceStatus,
    pub questions: MemberQuestionLog,
    pub conversation: WeeklyConversation,
}

#[derive(Debug, Clone, Copy)]
pub struct WeekResolver<'a> {
    store: &'a RecordStore,
}

impl<'a> WeekResolver<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    /// Resolve `week`. Weeks outside `1..=total_weeks` are rejected, never clamped.
    pub fn resolve(&self, week: i64) -> Result<WeekView> {
        let total_weeks = self.store.total_weeks();
        let week = u32::try_from(week)
            .ok()
            .filter(|w| self.store.member().contains_week(*w))
            .ok_or_else(|| JourneyError::out_of_range(week, total_weeks))?;

        let entry = self
            .store
            .entry(week)
            .cloned()
            .ok_or_else(|| JourneyError::out_of_range(i64::from(week), total_weeks))?;

        let summary = self
            .store
            .summary(week)
            .cloned()
            .unwrap_or_else(|| default_summary(&entry));
        let questions = self
            .store
            .questions(week)
            .cloned()
            .unwrap_or_else(|| default_question_log(week));
        let conversation = self
            .store
            .conversation(week)
            .cloned()
            .unwrap_or_else(|| default_conversation(week));
        let device_status = device_status_for_week(
            self.store.device_status(),
            self.store.member().weeks_behind(week),
        );

        Ok(WeekView {
            week,
            entry,
            summary,
            device_status,
            questions,
            conversation,
        })
    }
}
