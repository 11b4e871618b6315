use std::sync::Arc;

use serde::Serialize;

use crate::aggregate::{snapshot_or_placeholder, MetricProfile, OptimalRange, Snapshot};
use crate::assistant::{
    ChatSession, ConversationCorpus, Exchange, GroundedAssistant, PromptRules, SessionRegistry,
};
use crate::config::AssistantConfig;
use crate::correlate::{annotate, AnnotatedSeries};
use crate::error::Result;
use crate::llm::LlmProvider;
use crate::models::{ConversationMessage, Intervention, Member, MetricKind, MetricSeries, WeekEntry};
use crate::store::RecordStore;
use crate::timeline::{WeekResolver, WeekView};

/// Chart-ready series: annotated points plus the metric's chart metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    #[serde(flatten)]
    pub series: AnnotatedSeries,
    pub title: &'static str,
    pub unit: &'static str,
    pub optimal_range: OptimalRange,
    pub legend: Vec<Intervention>,
}

/// The rendering layer's whole query surface over one loaded record.
///
/// Cheap to clone; the record and corpus are shared read-only between all
/// sessions.
#[derive(Clone)]
pub struct Dashboard {
    store: Arc<RecordStore>,
    corpus: Arc<ConversationCorpus>,
    assistant: Arc<GroundedAssistant>,
    sessions: SessionRegistry,
}

impl Dashboard {
    pub fn new(store: RecordStore, llm: LlmProvider, config: &AssistantConfig) -> Self {
        let corpus = ConversationCorpus::from_store(&store);
        let rules = PromptRules::new(&config.name, &store.member().name);

        tracing::info!(
            member = %store.member().member_id,
            weeks = store.total_weeks(),
            corpus_weeks = corpus.len(),
            assistant = %config.name,
            "Dashboard ready"
        );

        Self {
            store: Arc::new(store),
            corpus: Arc::new(corpus),
            assistant: Arc::new(GroundedAssistant::new(llm, rules)),
            sessions: SessionRegistry::new(config.max_sessions),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn member(&self) -> &Member {
        self.store.member()
    }

    pub fn timeline(&self) -> &[WeekEntry] {
        self.store.timeline()
    }

    fn series(&self, metric: MetricKind) -> MetricSeries {
        self.store
            .series(metric)
            .cloned()
            .unwrap_or_else(|| MetricSeries::empty(metric))
    }

    /// Latest-state card for `metric`. A metric without samples yields a
    /// placeholder rather than an error.
    pub fn current_snapshot(&self, metric: MetricKind) -> Snapshot {
        snapshot_or_placeholder(&self.series(metric), &MetricProfile::for_metric(metric))
    }

    pub fn snapshots(&self) -> Vec<Snapshot> {
        MetricKind::ALL
            .into_iter()
            .map(|metric| self.current_snapshot(metric))
            .collect()
    }

    pub fn week_view(&self, week: i64) -> Result<WeekView> {
        WeekResolver::new(&self.store).resolve(week)
    }

    pub fn annotated_series(&self, metric: MetricKind) -> ChartView {
        let profile = MetricProfile::for_metric(metric);
        let interventions = self.store.interventions();

        ChartView {
            series: annotate(&self.series(metric), interventions),
            title: profile.title,
            unit: profile.unit,
            optimal_range: profile.optimal_range,
            legend: interventions.to_vec(),
        }
    }

    pub fn open_session(&self) -> Arc<ChatSession> {
        self.sessions.create(self.assistant.greeting())
    }

    pub fn session_messages(&self, session_id: &str) -> Result<Vec<ConversationMessage>> {
        Ok(self.sessions.get(session_id)?.messages())
    }

    /// Ask within an existing session. Always yields a displayable reply for
    /// a valid question; errors only for unknown sessions, blank questions or
    /// an exchange already in flight.
    pub async fn ask(&self, session_id: &str, question: &str) -> Result<Exchange> {
        let session = self.sessions.get(session_id)?;
        session.ask(&self.assistant, &self.corpus, question).await
    }
}
