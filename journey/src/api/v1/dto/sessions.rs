//! Assistant session DTOs for the v1 API.

use serde::{Deserialize, Serialize};

use crate::assistant::{Exchange, ExchangeOutcome};
use crate::models::{ConversationMessage, Sender};

/// Request body for `POST /v1/sessions/{sessionId}/messages`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum V1Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub sender: V1Sender,
    pub text: String,
}

impl From<&ConversationMessage> for MessageResponse {
    fn from(message: &ConversationMessage) -> Self {
        Self {
            sender: match message.sender {
                Sender::User => V1Sender::User,
                Sender::Assistant => V1Sender::Assistant,
            },
            text: message.text.clone(),
        }
    }
}

/// Response body for `POST /v1/sessions`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
    /// Starts with the assistant greeting.
    pub messages: Vec<MessageResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum V1ExchangeStatus {
    /// The assistant answered from the history.
    Answered,
    /// The history holds no answer; `reply` is the fixed refusal sentence.
    Ungrounded,
    /// The generation service could not be used; `reply` explains.
    Failed,
}

/// Response body for `POST /v1/sessions/{sessionId}/messages`.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponse {
    pub question: MessageResponse,
    pub reply: MessageResponse,
    pub status: V1ExchangeStatus,
    /// Weeks cited by the answer that exist in the history.
    pub cited_weeks: Vec<u32>,
    /// Failure classification, e.g. `"missing_credential"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl From<Exchange> for ExchangeResponse {
    fn from(exchange: Exchange) -> Self {
        let (status, cited_weeks, failure) = match exchange.outcome {
            ExchangeOutcome::Answered { cited_weeks } => {
                (V1ExchangeStatus::Answered, cited_weeks, None)
            }
            ExchangeOutcome::Ungrounded => (V1ExchangeStatus::Ungrounded, Vec::new(), None),
            ExchangeOutcome::Failed { kind } => (
                V1ExchangeStatus::Failed,
                Vec::new(),
                Some(kind.as_str().to_string()),
            ),
        };

        Self {
            question: MessageResponse::from(&exchange.question),
            reply: MessageResponse::from(&exchange.reply),
            status,
            cited_weeks,
            failure,
        }
    }
}
