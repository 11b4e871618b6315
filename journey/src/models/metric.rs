use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JourneyError;

/// Named metric tracked across the journey.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    BloodPressure,
    Adherence,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::BloodPressure, MetricKind::Adherence];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodPressure => "blood_pressure",
            Self::Adherence => "adherence",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricKind {
    type Err = JourneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "blood_pressure" | "bloodPressure" | "blood-pressure" => Ok(Self::BloodPressure),
            "adherence" => Ok(Self::Adherence),
            other => Err(JourneyError::NotFound(format!("Unknown metric: {other}"))),
        }
    }
}

/// One weekly observation. Paired readings keep the primary component in
/// `value` and the auxiliary one in `secondary` (systolic / diastolic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub week: u32,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<f64>,
}

impl MetricSample {
    pub fn new(week: u32, value: f64) -> Self {
        Self {
            week,
            value,
            secondary: None,
        }
    }

    pub fn paired(week: u32, value: f64, secondary: f64) -> Self {
        Self {
            week,
            value,
            secondary: Some(secondary),
        }
    }

    /// Same reading attributed to another week.
    pub fn at_week(&self, week: u32) -> Self {
        Self {
            week,
            ..self.clone()
        }
    }
}

impl AsRef<MetricSample> for MetricSample {
    fn as_ref(&self) -> &MetricSample {
        self
    }
}

/// Ordered, week-indexed samples of a single metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: MetricKind,
    pub samples: Vec<MetricSample>,
}

impl MetricSeries {
    pub fn new(metric: MetricKind, mut samples: Vec<MetricSample>) -> Self {
        samples.sort_by_key(|sample| sample.week);
        Self { metric, samples }
    }

    pub fn empty(metric: MetricKind) -> Self {
        Self {
            metric,
            samples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn latest(&self) -> Option<&MetricSample> {
        self.samples.last()
    }

    pub fn get(&self, week: u32) -> Option<&MetricSample> {
        self.samples
            .binary_search_by_key(&week, |sample| sample.week)
            .ok()
            .map(|index| &self.samples[index])
    }

    /// The last `n` samples, or all of them when the series is shorter.
    pub fn trailing(&self, n: usize) -> &[MetricSample] {
        let start = self.samples.len().saturating_sub(n);
        &self.samples[start..]
    }
}
