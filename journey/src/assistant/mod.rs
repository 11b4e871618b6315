//! Grounded Assistant.
//!
//! Answers free-text questions from the recorded conversation history only,
//! with week citations and a fixed refusal when the history has no answer.

mod citation;
mod corpus;
mod exchange;
mod prompt;
mod session;

pub use citation::{extract_cited_weeks, is_refusal, validate_citations};
pub use corpus::ConversationCorpus;
pub use exchange::{
    validate_question, Exchange, ExchangeOutcome, ExchangePhase, FailureKind, GroundedAssistant,
    Reply,
};
pub use prompt::{PromptRules, APOLOGY, MISSING_CREDENTIAL};
pub use session::{ChatSession, SessionRegistry};
