//! Intervention Correlator.
//!
//! Attaches interventions to metric samples by week. When several
//! interventions share a week, the one defined first in the list is attached
//! and the others appear only in the legend.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Intervention, MetricKind, MetricSample, MetricSeries};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedSample {
    #[serde(flatten)]
    pub sample: MetricSample,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intervention: Option<Intervention>,
}

impl AsRef<MetricSample> for AnnotatedSample {
    fn as_ref(&self) -> &MetricSample {
        &self.sample
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedSeries {
    pub metric: MetricKind,
    pub points: Vec<AnnotatedSample>,
}

impl AnnotatedSeries {
    /// Tooltip lookup by week key.
    pub fn intervention_at(&self, week: u32) -> Option<&Intervention> {
        self.points
            .iter()
            .find(|point| point.sample.week == week)
            .and_then(|point| point.intervention.as_ref())
    }

    pub fn marker_weeks(&self) -> impl Iterator<Item = u32> + '_ {
        self.points
            .iter()
            .filter(|point| point.intervention.is_some())
            .map(|point| point.sample.week)
    }
}

/// Anything that can be annotated: raw series or already-annotated ones.
pub trait SampleSource {
    type Sample: AsRef<MetricSample>;

    fn metric(&self) -> MetricKind;
    fn samples(&self) -> &[Self::Sample];
}

impl SampleSource for MetricSeries {
    type Sample = MetricSample;

    fn metric(&self) -> MetricKind {
        self.metric
    }

    fn samples(&self) -> &[MetricSample] {
        &self.samples
    }
}

impl SampleSource for AnnotatedSeries {
    type Sample = AnnotatedSample;

    fn metric(&self) -> MetricKind {
        self.metric
    }

    fn samples(&self) -> &[AnnotatedSample] {
        &self.points
    }
}

/// First intervention defined for each week.
pub fn index_by_week(interventions: &[Intervention]) -> HashMap<u32, &Intervention> {
    let mut index = HashMap::with_capacity(interventions.len());
    for intervention in interventions {
        index.entry(intervention.week).or_insert(intervention);
    }
    index
}

/// Annotate every sample with the intervention of its week, if any.
/// Existing annotations are discarded, so annotating twice is a no-op.
pub fn annotate<S: SampleSource>(series: &S, interventions: &[Intervention]) -> AnnotatedSeries {
    let index = index_by_week(interventions);

    let points = series
        .samples()
        .iter()
        .map(|sample| {
            let sample = sample.as_ref().clone();
            let intervention = index.get(&sample.week).map(|i| (*i).clone());
            AnnotatedSample {
                sample,
                intervention,
            }
        })
        .collect();

    AnnotatedSeries {
        metric: series.metric(),
        points,
    }
}
