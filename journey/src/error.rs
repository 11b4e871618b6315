use thiserror::Error;

use crate::models::MetricKind;

#[derive(Error, Debug)]
pub enum JourneyError {
    #[error("Metric series '{metric}' has no samples")]
    EmptySeries { metric: MetricKind },

    #[error("Week {week} is outside the tracked range 1..={total_weeks}")]
    OutOfRange { week: i64, total_weeks: u32 },

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Generation service failure: {0}")]
    UpstreamFailure(String),

    #[error("LLM unavailable: {0}")]
    LlmUnavailable(String),

    #[error("An exchange is already in flight for session {session_id}")]
    ExchangeInFlight { session_id: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JourneyError {
    pub fn out_of_range(week: i64, total_weeks: u32) -> Self {
        Self::OutOfRange { week, total_weeks }
    }
}

pub type Result<T> = std::result::Result<T, JourneyError>;
