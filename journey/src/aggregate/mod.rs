//! Metric Aggregator.
//!
//! Reduces a full metric series to what a dashboard card shows: the latest
//! reading, a short sparkline window, a status class and a trend label. The
//! aggregator itself knows nothing about specific metrics; all thresholds live
//! in [`MetricProfile`].

mod ladder;
mod profile;

use serde::Serialize;

use crate::error::{JourneyError, Result};
use crate::models::{MetricKind, MetricSample, MetricSeries};

pub use ladder::{Ladder, Predicate, Rung, StatusClass, Trend, TrendDirection};
pub use profile::{MetricProfile, OptimalRange};

/// Length of the trailing sparkline window.
pub const SPARKLINE_WEEKS: usize = 8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub metric: MetricKind,
    pub latest: Option<MetricSample>,
    pub window: Vec<MetricSample>,
    pub status: Option<StatusClass>,
    pub trend: Option<Trend>,
}

impl Snapshot {
    /// Neutral snapshot for a metric with no samples.
    pub fn placeholder(metric: MetricKind) -> Self {
        Self {
            metric,
            latest: None,
            window: Vec::new(),
            status: None,
            trend: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.latest.is_none()
    }
}

pub fn current_snapshot(series: &MetricSeries, profile: &MetricProfile) -> Result<Snapshot> {
    let latest = series
        .latest()
        .ok_or(JourneyError::EmptySeries {
            metric: series.metric,
        })?
        .clone();

    Ok(Snapshot {
        metric: series.metric,
        window: series.trailing(SPARKLINE_WEEKS).to_vec(),
        status: Some(profile.classify(&latest)),
        trend: Some(profile.trend_of(&latest)),
        latest: Some(latest),
    })
}

/// [`current_snapshot`] with `EmptySeries` recovered into a placeholder.
pub fn snapshot_or_placeholder(series: &MetricSeries, profile: &MetricProfile) -> Snapshot {
    match current_snapshot(series, profile) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::debug!(metric = %series.metric, error = %e, "Using placeholder snapshot");
            Snapshot::placeholder(series.metric)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adherence(values: &[f64]) -> MetricSeries {
        MetricSeries::new(
            MetricKind::Adherence,
            values
                .iter()
                .enumerate()
                .map(|(i, v)| MetricSample::new(i as u32 + 1, *v))
                .collect(),
        )
    }

    #[test]
    fn empty_series_fails() {
        let series = MetricSeries::empty(MetricKind::BloodPressure);
        let profile = MetricProfile::for_metric(MetricKind::BloodPressure);
        assert!(matches!(
            current_snapshot(&series, &profile),
            Err(JourneyError::EmptySeries {
                metric: MetricKind::BloodPressure
            })
        ));
    }

    #[test]
    fn empty_series_recovers_to_placeholder() {
        let series = MetricSeries::empty(MetricKind::Adherence);
        let profile = MetricProfile::for_metric(MetricKind::Adherence);
        let snapshot = snapshot_or_placeholder(&series, &profile);
        assert!(snapshot.is_placeholder());
        assert!(snapshot.window.is_empty());
        assert!(snapshot.status.is_none());
    }

    #[test]
    fn latest_value_drives_status() {
        let series = adherence(&[1.0, 0.8, 0.9]);
        let profile = MetricProfile::for_metric(MetricKind::Adherence);
        let snapshot = current_snapshot(&series, &profile).unwrap();

        assert_eq!(snapshot.latest.as_ref().map(|s| s.value), Some(0.9));
        assert_eq!(snapshot.status, Some(StatusClass::Excellent));
        assert_eq!(snapshot.window.len(), 3);
    }

    #[test]
    fn window_is_last_eight_weeks() {
        let series = adherence(&[0.9; 20]);
        let profile = MetricProfile::for_metric(MetricKind::Adherence);
        let snapshot = current_snapshot(&series, &profile).unwrap();

        let weeks: Vec<u32> = snapshot.window.iter().map(|s| s.week).collect();
        assert_eq!(weeks, (13..=20).collect::<Vec<_>>());
    }
}
