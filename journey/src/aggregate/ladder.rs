use serde::{Deserialize, Serialize};

use crate::models::MetricSample;

/// Severity class of a metric reading, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusClass {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl StatusClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Stable,
    Down,
}

/// Threshold-relative label of the current reading. Not a slope over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub direction: TrendDirection,
    pub label: &'static str,
}

impl Trend {
    pub const fn new(direction: TrendDirection, label: &'static str) -> Self {
        Self { direction, label }
    }
}

pub type Predicate = fn(&MetricSample) -> bool;

#[derive(Debug, Clone)]
pub struct Rung<T> {
    pub outcome: T,
    pub predicate: Predicate,
}

/// Ordered predicate list evaluated top-down; the first matching rung wins
/// and `fallback` applies when none match.
#[derive(Debug, Clone)]
pub struct Ladder<T> {
    rungs: Vec<Rung<T>>,
    fallback: T,
}

impl<T: Clone> Ladder<T> {
    pub fn new(fallback: T) -> Self {
        Self {
            rungs: Vec::new(),
            fallback,
        }
    }

    pub fn rung(mut self, outcome: T, predicate: Predicate) -> Self {
        self.rungs.push(Rung { outcome, predicate });
        self
    }

    pub fn evaluate(&self, sample: &MetricSample) -> T {
        self.rungs
            .iter()
            .find(|rung| (rung.predicate)(sample))
            .map(|rung| rung.outcome.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}
