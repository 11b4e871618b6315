use serde::Serialize;

use crate::error::{JourneyError, Result};
use crate::llm::{CompletionOptions, LlmProvider};
use crate::models::ConversationMessage;

use super::citation::{extract_cited_weeks, is_refusal, validate_citations};
use super::corpus::ConversationCorpus;
use super::prompt::{PromptRules, APOLOGY, MISSING_CREDENTIAL};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangePhase {
    Idle,
    Sending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    MissingCredential,
    UpstreamFailure,
    ProviderUnavailable,
}

impl FailureKind {
    pub fn from_error(error: &JourneyError) -> Self {
        match error {
            JourneyError::MissingCredential(_) => Self::MissingCredential,
            JourneyError::LlmUnavailable(_) => Self::ProviderUnavailable,
            _ => Self::UpstreamFailure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::UpstreamFailure => "upstream_failure",
            Self::ProviderUnavailable => "provider_unavailable",
        }
    }

    /// Text shown to the member for this failure.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => MISSING_CREDENTIAL,
            Self::UpstreamFailure | Self::ProviderUnavailable => APOLOGY,
        }
    }
}

/// How an exchange ended. A refusal is a regular outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExchangeOutcome {
    Answered { cited_weeks: Vec<u32> },
    Ungrounded,
    Failed { kind: FailureKind },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reply {
    pub message: ConversationMessage,
    pub outcome: ExchangeOutcome,
}

impl Reply {
    pub fn failed(kind: FailureKind) -> Self {
        Self {
            message: ConversationMessage::assistant(kind.user_message()),
            outcome: ExchangeOutcome::Failed { kind },
        }
    }
}

/// One completed question/answer pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exchange {
    pub question: ConversationMessage,
    pub reply: ConversationMessage,
    pub outcome: ExchangeOutcome,
}

#[derive(Debug, Clone)]
pub struct GroundedAssistant {
    llm: LlmProvider,
    rules: PromptRules,
    options: CompletionOptions,
}

impl GroundedAssistant {
    pub fn new(llm: LlmProvider, rules: PromptRules) -> Self {
        Self {
            llm,
            rules,
            options: CompletionOptions {
                temperature: Some(0.2),
                max_tokens: None,
            },
        }
    }

    pub fn rules(&self) -> &PromptRules {
        &self.rules
    }

    pub fn greeting(&self) -> ConversationMessage {
        ConversationMessage::assistant(self.rules.greeting())
    }

    /// Ask once and turn whatever happens into a displayable reply.
    pub async fn answer(&self, question: &str, corpus: &ConversationCorpus) -> Reply {
        let refusal = self.rules.refusal();

        if corpus.is_empty() {
            tracing::info!("Conversation corpus is empty, refusing without a request");
            return Reply {
                message: ConversationMessage::assistant(refusal),
                outcome: ExchangeOutcome::Ungrounded,
            };
        }

        let prompt = self.rules.build(question, corpus);
        match self.llm.complete(&prompt, Some(&self.options)).await {
            Ok(text) if is_refusal(&text, &refusal) => Reply {
                message: ConversationMessage::assistant(refusal),
                outcome: ExchangeOutcome::Ungrounded,
            },
            Ok(text) => {
                let cited_weeks = validate_citations(extract_cited_weeks(&text), corpus);
                tracing::debug!(citations = cited_weeks.len(), "Assistant answered");
                Reply {
                    message: ConversationMessage::assistant(text),
                    outcome: ExchangeOutcome::Answered { cited_weeks },
                }
            }
            Err(e) => {
                let kind = FailureKind::from_error(&e);
                match kind {
                    FailureKind::MissingCredential => {
                        tracing::warn!(kind = kind.as_str(), error = %e, "Assistant is not configured")
                    }
                    _ => tracing::error!(kind = kind.as_str(), error = %e, "Assistant exchange failed"),
                }
                Reply::failed(kind)
            }
        }
    }

    /// Append the question, ask, then append the reply. Blank questions are
    /// rejected before anything is appended.
    pub async fn ask(
        &self,
        question: &str,
        corpus: &ConversationCorpus,
        history: &mut Vec<ConversationMessage>,
    ) -> Result<Exchange> {
        let question = validate_question(question)?;

        let asked = ConversationMessage::user(question);
        history.push(asked.clone());

        let reply = self.answer(question, corpus).await;
        history.push(reply.message.clone());

        Ok(Exchange {
            question: asked,
            reply: reply.message,
            outcome: reply.outcome,
        })
    }
}

pub fn validate_question(question: &str) -> Result<&str> {
    let question = question.trim();
    if question.is_empty() {
        return Err(JourneyError::Validation(
            "Question cannot be empty".to_string(),
        ));
    }
    Ok(question)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant() -> GroundedAssistant {
        GroundedAssistant::new(
            LlmProvider::unavailable("test"),
            PromptRules::new("Aura", "Rohan"),
        )
    }

    fn corpus() -> ConversationCorpus {
        ConversationCorpus::new("Rohan").with_entry(9, "Surgery recovery.")
    }

    #[tokio::test]
    async fn blank_question_appends_nothing() {
        let mut history = vec![assistant().greeting()];
        let result = assistant().ask("  \n", &corpus(), &mut history).await;

        assert!(matches!(result, Err(JourneyError::Validation(_))));
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn unavailable_provider_yields_apology_after_question() {
        let mut history = Vec::new();
        let exchange = assistant()
            .ask("How was recovery?", &corpus(), &mut history)
            .await
            .unwrap();

        assert_eq!(
            exchange.outcome,
            ExchangeOutcome::Failed {
                kind: FailureKind::ProviderUnavailable
            }
        );
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], ConversationMessage::user("How was recovery?"));
        assert_eq!(history[1].text, APOLOGY);
    }

    #[tokio::test]
    async fn empty_corpus_refuses_without_calling_service() {
        let reply = assistant()
            .answer("Anything?", &ConversationCorpus::new("Rohan"))
            .await;
        assert_eq!(reply.outcome, ExchangeOutcome::Ungrounded);
        assert_eq!(reply.message.text, PromptRules::new("Aura", "Rohan").refusal());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(ExchangeOutcome::Answered {
            cited_weeks: vec![8, 9],
        })
        .unwrap();
        assert_eq!(json["status"], "answered");
        assert_eq!(json["cited_weeks"], serde_json::json!([8, 9]));

        let json = serde_json::to_value(ExchangeOutcome::Failed {
            kind: FailureKind::MissingCredential,
        })
        .unwrap();
        assert_eq!(json["kind"], "missing_credential");
    }
}
