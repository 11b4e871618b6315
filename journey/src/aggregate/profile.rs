use serde::Serialize;

use crate::models::{MetricKind, MetricSample};

use super::ladder::{Ladder, StatusClass, Trend, TrendDirection};

/// Inclusive band drawn behind the chart, in the metric's own units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimalRange {
    pub low: f64,
    pub high: f64,
}

/// Everything the aggregator and chart need to know about one metric.
#[derive(Debug, Clone)]
pub struct MetricProfile {
    pub kind: MetricKind,
    pub title: &'static str,
    pub unit: &'static str,
    pub optimal_range: OptimalRange,
    pub status: Ladder<StatusClass>,
    pub trend: Ladder<Trend>,
}

impl MetricProfile {
    pub fn for_metric(kind: MetricKind) -> Self {
        match kind {
            MetricKind::BloodPressure => blood_pressure(),
            MetricKind::Adherence => adherence(),
        }
    }

    pub fn classify(&self, sample: &MetricSample) -> StatusClass {
        self.status.evaluate(sample)
    }

    pub fn trend_of(&self, sample: &MetricSample) -> Trend {
        self.trend.evaluate(sample)
    }
}

// Systolic lives in `value`, diastolic in `secondary`. A reading without a
// diastolic component is judged on systolic alone.
fn bp_within(sample: &MetricSample, systolic: f64, diastolic: f64) -> bool {
    sample.value <= systolic && sample.secondary.map_or(true, |d| d <= diastolic)
}

fn blood_pressure() -> MetricProfile {
    MetricProfile {
        kind: MetricKind::BloodPressure,
        title: "Blood Pressure",
        unit: "mmHg",
        optimal_range: OptimalRange {
            low: 90.0,
            high: 130.0,
        },
        status: Ladder::new(StatusClass::Critical)
            .rung(StatusClass::Excellent, |s| bp_within(s, 130.0, 80.0))
            .rung(StatusClass::Good, |s| bp_within(s, 140.0, 90.0))
            .rung(StatusClass::Warning, |s| bp_within(s, 160.0, 100.0)),
        trend: Ladder::new(Trend::new(TrendDirection::Stable, "Normal"))
            .rung(Trend::new(TrendDirection::Up, "Elevated"), |s| s.value > 140.0),
    }
}

fn adherence_level(sample: &MetricSample) -> f64 {
    sample.value.clamp(0.0, 1.0)
}

fn adherence() -> MetricProfile {
    MetricProfile {
        kind: MetricKind::Adherence,
        title: "Medication Adherence",
        unit: "%",
        optimal_range: OptimalRange {
            low: 0.8,
            high: 1.0,
        },
        status: Ladder::new(StatusClass::Critical)
            .rung(StatusClass::Excellent, |s| adherence_level(s) >= 0.90)
            .rung(StatusClass::Good, |s| adherence_level(s) >= 0.80)
            .rung(StatusClass::Warning, |s| adherence_level(s) >= 0.70),
        trend: Ladder::new(Trend::new(TrendDirection::Down, "Needs attention"))
            .rung(Trend::new(TrendDirection::Up, "Excellent"), |s| {
                adherence_level(s) >= 0.9
            })
            .rung(Trend::new(TrendDirection::Stable, "Good"), |s| {
                adherence_level(s) >= 0.7
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(systolic: f64, diastolic: f64) -> StatusClass {
        MetricProfile::for_metric(MetricKind::BloodPressure)
            .classify(&MetricSample::paired(1, systolic, diastolic))
    }

    fn adh(value: f64) -> StatusClass {
        MetricProfile::for_metric(MetricKind::Adherence).classify(&MetricSample::new(1, value))
    }

    #[test]
    fn blood_pressure_ladder_bounds() {
        assert_eq!(bp(120.0, 78.0), StatusClass::Excellent);
        assert_eq!(bp(130.0, 80.0), StatusClass::Excellent);
        assert_eq!(bp(130.0, 81.0), StatusClass::Good);
        assert_eq!(bp(140.0, 90.0), StatusClass::Good);
        assert_eq!(bp(145.0, 92.0), StatusClass::Warning);
        assert_eq!(bp(160.0, 100.0), StatusClass::Warning);
        assert_eq!(bp(161.0, 85.0), StatusClass::Critical);
        assert_eq!(bp(150.0, 101.0), StatusClass::Critical);
    }

    #[test]
    fn blood_pressure_without_diastolic_uses_systolic() {
        let profile = MetricProfile::for_metric(MetricKind::BloodPressure);
        assert_eq!(
            profile.classify(&MetricSample::new(1, 128.0)),
            StatusClass::Excellent
        );
        assert_eq!(
            profile.classify(&MetricSample::new(1, 170.0)),
            StatusClass::Critical
        );
    }

    #[test]
    fn adherence_ladder_bounds() {
        assert_eq!(adh(0.90), StatusClass::Excellent);
        assert_eq!(adh(0.89), StatusClass::Good);
        assert_eq!(adh(0.80), StatusClass::Good);
        assert_eq!(adh(0.70), StatusClass::Warning);
        assert_eq!(adh(0.69), StatusClass::Critical);
    }

    #[test]
    fn adherence_is_clamped_before_classification() {
        assert_eq!(adh(1.7), StatusClass::Excellent);
        assert_eq!(adh(-0.3), StatusClass::Critical);
    }

    #[test]
    fn trend_labels() {
        let bp = MetricProfile::for_metric(MetricKind::BloodPressure);
        assert_eq!(
            bp.trend_of(&MetricSample::paired(1, 141.0, 85.0)),
            Trend::new(TrendDirection::Up, "Elevated")
        );
        assert_eq!(
            bp.trend_of(&MetricSample::paired(1, 140.0, 85.0)),
            Trend::new(TrendDirection::Stable, "Normal")
        );

        let adherence = MetricProfile::for_metric(MetricKind::Adherence);
        assert_eq!(adherence.trend_of(&MetricSample::new(1, 0.95)).label, "Excellent");
        assert_eq!(adherence.trend_of(&MetricSample::new(1, 0.75)).label, "Good");
        assert_eq!(
            adherence.trend_of(&MetricSample::new(1, 0.5)).direction,
            TrendDirection::Down
        );
    }
}
