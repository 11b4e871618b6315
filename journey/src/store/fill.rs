//! Gap filling for authored metric series.
//!
//! Authored data may skip weeks; the store never exposes a week without a
//! value once filling is applied:
//! - adherence gaps take the timeline adherence level of the same week;
//! - other metrics carry the nearest earlier sample forward, and leading gaps
//!   take the first authored sample.
//!
//! A metric with no authored samples stays empty.

use std::collections::BTreeMap;

use crate::models::{MetricKind, MetricSample, MetricSeries, WeekEntry};

pub fn fill_gaps(
    metric: MetricKind,
    authored: &[MetricSample],
    timeline: &[WeekEntry],
    total_weeks: u32,
) -> MetricSeries {
    if authored.is_empty() {
        return MetricSeries::empty(metric);
    }

    let by_week: BTreeMap<u32, &MetricSample> =
        authored.iter().map(|sample| (sample.week, sample)).collect();

    let samples = match metric {
        MetricKind::Adherence => (1..=total_weeks)
            .filter_map(|week| match by_week.get(&week) {
                Some(sample) => Some(clamp_adherence(sample)),
                None => timeline
                    .iter()
                    .find(|entry| entry.week == week)
                    .map(|entry| MetricSample::new(week, entry.adherence_level.clamp(0.0, 1.0))),
            })
            .collect(),
        _ => carry_forward(&by_week, total_weeks),
    };

    MetricSeries::new(metric, samples)
}

fn carry_forward(by_week: &BTreeMap<u32, &MetricSample>, total_weeks: u32) -> Vec<MetricSample> {
    let Some(first) = by_week.values().next() else {
        return Vec::new();
    };

    let mut previous: &MetricSample = first;
    (1..=total_weeks)
        .map(|week| match by_week.get(&week) {
            Some(&sample) => {
                previous = sample;
                sample.clone()
            }
            None => previous.at_week(week),
        })
        .collect()
}

fn clamp_adherence(sample: &MetricSample) -> MetricSample {
    MetricSample {
        value: sample.value.clamp(0.0, 1.0),
        ..sample.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(levels: &[f64]) -> Vec<WeekEntry> {
        levels
            .iter()
            .enumerate()
            .map(|(i, level)| WeekEntry {
                week: i as u32 + 1,
                adherence_level: *level,
                major_event: None,
            })
            .collect()
    }

    #[test]
    fn adherence_gaps_come_from_timeline() {
        let timeline = timeline(&[0.86, 0.9, 0.88, 0.92]);
        let authored = vec![MetricSample::new(3, 0.7)];

        let series = fill_gaps(MetricKind::Adherence, &authored, &timeline, 4);

        let values: Vec<f64> = series.samples.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.86, 0.9, 0.7, 0.92]);
    }

    #[test]
    fn adherence_values_are_clamped() {
        let timeline = timeline(&[1.0, 1.0]);
        let authored = vec![MetricSample::new(1, 1.4), MetricSample::new(2, -0.2)];

        let series = fill_gaps(MetricKind::Adherence, &authored, &timeline, 2);

        assert_eq!(series.samples[0].value, 1.0);
        assert_eq!(series.samples[1].value, 0.0);
    }

    #[test]
    fn blood_pressure_carries_previous_reading_forward() {
        let timeline = timeline(&[1.0; 5]);
        let authored = vec![
            MetricSample::paired(2, 140.0, 88.0),
            MetricSample::paired(4, 132.0, 84.0),
        ];

        let series = fill_gaps(MetricKind::BloodPressure, &authored, &timeline, 5);

        assert_eq!(series.len(), 5);
        assert_eq!(series.get(1), Some(&MetricSample::paired(1, 140.0, 88.0)));
        assert_eq!(series.get(3), Some(&MetricSample::paired(3, 140.0, 88.0)));
        assert_eq!(series.get(5), Some(&MetricSample::paired(5, 132.0, 84.0)));
    }

    #[test]
    fn empty_authored_series_stays_empty() {
        let timeline = timeline(&[0.9, 0.9]);
        let series = fill_gaps(MetricKind::BloodPressure, &[], &timeline, 2);
        assert!(series.is_empty());

        let series = fill_gaps(MetricKind::Adherence, &[], &timeline, 2);
        assert!(series.is_empty());
    }
}
