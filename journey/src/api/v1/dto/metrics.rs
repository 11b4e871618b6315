//! Metric snapshot and chart DTOs for the v1 API.

use serde::Serialize;

use crate::aggregate::{Snapshot, StatusClass, TrendDirection};
use crate::correlate::AnnotatedSample;
use crate::models::{Intervention, MetricSample};
use crate::services::ChartView;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum V1StatusClass {
    Excellent,
    Good,
    Warning,
    Critical,
}

impl From<StatusClass> for V1StatusClass {
    fn from(status: StatusClass) -> Self {
        match status {
            StatusClass::Excellent => Self::Excellent,
            StatusClass::Good => Self::Good,
            StatusClass::Warning => Self::Warning,
            StatusClass::Critical => Self::Critical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum V1TrendDirection {
    Up,
    Stable,
    Down,
}

impl From<TrendDirection> for V1TrendDirection {
    fn from(direction: TrendDirection) -> Self {
        match direction {
            TrendDirection::Up => Self::Up,
            TrendDirection::Stable => Self::Stable,
            TrendDirection::Down => Self::Down,
        }
    }
}

/// One weekly reading. Blood pressure carries systolic in `value` and
/// diastolic in `secondary`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SamplePoint {
    pub week: u32,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<f64>,
}

impl From<&MetricSample> for SamplePoint {
    fn from(sample: &MetricSample) -> Self {
        Self {
            week: sample.week,
            value: sample.value,
            secondary: sample.secondary,
        }
    }
}

/// Threshold-relative label of the latest reading (not a slope).
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct TrendResponse {
    pub direction: V1TrendDirection,
    pub label: String,
}

/// Response body for `GET /v1/metrics/{metric}/snapshot`.
///
/// A metric without samples returns a placeholder: no `latest`, an empty
/// `window` and no `status` or `trend`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub metric: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<SamplePoint>,
    /// Up to the last eight weeks, oldest first.
    pub window: Vec<SamplePoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<V1StatusClass>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<TrendResponse>,
}

impl From<Snapshot> for SnapshotResponse {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            metric: snapshot.metric.to_string(),
            latest: snapshot.latest.as_ref().map(SamplePoint::from),
            window: snapshot.window.iter().map(SamplePoint::from).collect(),
            status: snapshot.status.map(Into::into),
            trend: snapshot.trend.map(|trend| TrendResponse {
                direction: trend.direction.into(),
                label: trend.label.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct InterventionResponse {
    pub week: u32,
    pub title: String,
    pub description: String,
}

impl From<&Intervention> for InterventionResponse {
    fn from(intervention: &Intervention) -> Self {
        Self {
            week: intervention.week,
            title: intervention.title.clone(),
            description: intervention.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ChartPoint {
    pub week: u32,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<f64>,
    /// Marker and tooltip content for this week, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention: Option<InterventionResponse>,
}

impl From<&AnnotatedSample> for ChartPoint {
    fn from(point: &AnnotatedSample) -> Self {
        Self {
            week: point.sample.week,
            value: point.sample.value,
            secondary: point.sample.secondary,
            intervention: point.intervention.as_ref().map(InterventionResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct OptimalRangeResponse {
    pub low: f64,
    pub high: f64,
}

/// Response body for `GET /v1/metrics/{metric}/series`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResponse {
    pub metric: String,
    pub title: String,
    pub unit: String,
    pub optimal_range: OptimalRangeResponse,
    pub points: Vec<ChartPoint>,
    /// Every intervention in definition order.
    pub legend: Vec<InterventionResponse>,
}

impl From<ChartView> for SeriesResponse {
    fn from(chart: ChartView) -> Self {
        Self {
            metric: chart.series.metric.to_string(),
            title: chart.title.to_string(),
            unit: chart.unit.to_string(),
            optimal_range: OptimalRangeResponse {
                low: chart.optimal_range.low,
                high: chart.optimal_range.high,
            },
            points: chart.series.points.iter().map(ChartPoint::from).collect(),
            legend: chart.legend.iter().map(InterventionResponse::from).collect(),
        }
    }
}
