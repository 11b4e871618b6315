use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use nanoid::nanoid;
use tracing::Instrument;

use crate::error::{JourneyError, Result};
use crate::models::ConversationMessage;

use super::corpus::ConversationCorpus;
use super::exchange::{
    validate_question, Exchange, ExchangePhase, FailureKind, GroundedAssistant, Reply,
};

#[derive(Debug)]
struct SessionState {
    phase: ExchangePhase,
    messages: Vec<ConversationMessage>,
}

/// One member-facing chat. Messages are append-only and at most one exchange
/// is in flight at a time.
#[derive(Debug)]
pub struct ChatSession {
    id: String,
    state: Mutex<SessionState>,
}

impl ChatSession {
    pub fn new(id: impl Into<String>, greeting: ConversationMessage) -> Self {
        Self {
            id: id.into(),
            state: Mutex::new(SessionState {
                phase: ExchangePhase::Idle,
                messages: vec![greeting],
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phase(&self) -> ExchangePhase {
        self.lock().phase
    }

    pub fn messages(&self) -> Vec<ConversationMessage> {
        self.lock().messages.clone()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run one exchange: `Idle -> Sending -> Idle`. A second question while
    /// `Sending` is rejected with `ExchangeInFlight` and leaves history untouched.
    pub async fn ask(
        &self,
        assistant: &GroundedAssistant,
        corpus: &ConversationCorpus,
        question: &str,
    ) -> Result<Exchange> {
        let question = validate_question(question)?;
        let asked = ConversationMessage::user(question);

        {
            let mut state = self.lock();
            if state.phase == ExchangePhase::Sending {
                return Err(JourneyError::ExchangeInFlight {
                    session_id: self.id.clone(),
                });
            }
            state.phase = ExchangePhase::Sending;
            state.messages.push(asked.clone());
        }

        let mut guard = SendingGuard {
            session: self,
            settled: false,
        };

        let span = tracing::info_span!("exchange", session_id = %self.id);
        let reply = assistant.answer(question, corpus).instrument(span).await;
        guard.settle(&reply);

        Ok(Exchange {
            question: asked,
            reply: reply.message,
            outcome: reply.outcome,
        })
    }
}

/// Returns the session to `Idle` even if the exchange future is dropped
/// mid-request; the dropped exchange ends with the apology.
struct SendingGuard<'a> {
    session: &'a ChatSession,
    settled: bool,
}

impl SendingGuard<'_> {
    fn settle(&mut self, reply: &Reply) {
        let mut state = self.session.lock();
        state.messages.push(reply.message.clone());
        state.phase = ExchangePhase::Idle;
        self.settled = true;
    }
}

impl Drop for SendingGuard<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        tracing::warn!(session_id = %self.session.id, "Exchange abandoned before completion");
        let reply = Reply::failed(FailureKind::UpstreamFailure);
        let mut state = self.session.lock();
        state.messages.push(reply.message);
        state.phase = ExchangePhase::Idle;
    }
}

/// Bounded set of live chat sessions; the least recently used is evicted.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<LruCache<String, Arc<ChatSession>>>>,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            sessions: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<String, Arc<ChatSession>>> {
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn create(&self, greeting: ConversationMessage) -> Arc<ChatSession> {
        let session = Arc::new(ChatSession::new(nanoid!(), greeting));
        if let Some((evicted, _)) = self
            .lock()
            .push(session.id().to_string(), session.clone())
        {
            tracing::debug!(session_id = %evicted, "Evicted chat session");
        }
        tracing::info!(session_id = %session.id(), "Opened chat session");
        session
    }

    pub fn get(&self, id: &str) -> Result<Arc<ChatSession>> {
        self.lock()
            .get(id)
            .cloned()
            .ok_or_else(|| JourneyError::NotFound(format!("Chat session '{id}' not found")))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::PromptRules;
    use crate::llm::LlmProvider;

    fn assistant() -> GroundedAssistant {
        GroundedAssistant::new(
            LlmProvider::unavailable("test"),
            PromptRules::new("Aura", "Rohan"),
        )
    }

    #[test]
    fn registry_evicts_least_recently_used() {
        let registry = SessionRegistry::new(2);
        let greeting = assistant().greeting();

        let first = registry.create(greeting.clone());
        let second = registry.create(greeting.clone());
        registry.get(first.id()).unwrap();
        let third = registry.create(greeting);

        assert_eq!(registry.len(), 2);
        assert!(registry.get(first.id()).is_ok());
        assert!(matches!(
            registry.get(second.id()),
            Err(JourneyError::NotFound(_))
        ));
        assert!(registry.get(third.id()).is_ok());
    }

    #[test]
    fn new_session_starts_idle_with_greeting() {
        let registry = SessionRegistry::new(4);
        let session = registry.create(assistant().greeting());

        assert_eq!(session.phase(), ExchangePhase::Idle);
        assert_eq!(session.messages(), vec![assistant().greeting()]);
        assert_eq!(session.id().len(), 21);
    }

    #[tokio::test]
    async fn second_question_while_sending_is_rejected() {
        let session = ChatSession::new("s1", assistant().greeting());
        session.lock().phase = ExchangePhase::Sending;

        let result = session
            .ask(&assistant(), &ConversationCorpus::default(), "Hello?")
            .await;

        assert!(matches!(
            result,
            Err(JourneyError::ExchangeInFlight { session_id }) if session_id == "s1"
        ));
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test]
    async fn exchange_returns_session_to_idle() {
        let session = ChatSession::new("s1", assistant().greeting());
        let corpus = ConversationCorpus::new("Rohan").with_entry(9, "Surgery.");

        let exchange = session.ask(&assistant(), &corpus, "What happened?").await.unwrap();

        assert_eq!(session.phase(), ExchangePhase::Idle);
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], exchange.question);
        assert_eq!(messages[2], exchange.reply);
    }

    #[test]
    fn dropped_exchange_is_settled_with_apology() {
        let session = ChatSession::new("s1", assistant().greeting());
        {
            session.lock().phase = ExchangePhase::Sending;
            let _guard = SendingGuard {
                session: &session,
                settled: false,
            };
        }

        assert_eq!(session.phase(), ExchangePhase::Idle);
        assert_eq!(
            session.messages().last().map(|m| m.text.as_str()),
            Some(crate::assistant::APOLOGY)
        );
    }
}
