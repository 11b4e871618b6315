//! v1 Assistant session handlers.

use axum::extract::{Path, State};

use crate::api::extractors::AppJson;
use crate::api::v1::dto::{AskRequest, ExchangeResponse, MessageResponse, SessionResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;

/// `POST /api/v1/sessions`
#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "assistant",
    operation_id = "sessions.create",
    responses(
        (status = 201, description = "Session opened with the assistant greeting", body = SessionResponse),
    )
)]
pub async fn create_session(State(state): State<AppState>) -> ApiResponse<SessionResponse> {
    let session = state.dashboard.open_session();
    ApiResponse::created(SessionResponse {
        session_id: session.id().to_string(),
        messages: session.messages().iter().map(MessageResponse::from).collect(),
    })
}

/// `GET /api/v1/sessions/{sessionId}/messages`
#[utoipa::path(
    get,
    path = "/api/v1/sessions/{sessionId}/messages",
    tag = "assistant",
    operation_id = "sessions.messages.list",
    params(
        ("sessionId" = String, Path, description = "Session id"),
    ),
    responses(
        (status = 200, description = "Conversation so far, oldest first", body = Vec<MessageResponse>),
        (status = 404, description = "Unknown session", body = ApiError),
    )
)]
pub async fn list_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResponse<Vec<MessageResponse>> {
    match state.dashboard.session_messages(&session_id) {
        Ok(messages) => {
            let total = messages.len();
            ApiResponse::success_with_total(
                messages.iter().map(MessageResponse::from).collect(),
                total,
            )
        }
        Err(e) => e.into(),
    }
}

/// `POST /api/v1/sessions/{sessionId}/messages`
///
/// Always answers with a displayable reply for a valid question, including
/// the refusal and failure texts.
#[utoipa::path(
    post,
    path = "/api/v1/sessions/{sessionId}/messages",
    tag = "assistant",
    operation_id = "sessions.messages.ask",
    params(
        ("sessionId" = String, Path, description = "Session id"),
    ),
    request_body = AskRequest,
    responses(
        (status = 200, description = "Question and reply appended to the session", body = ExchangeResponse),
        (status = 400, description = "Blank question", body = ApiError),
        (status = 404, description = "Unknown session", body = ApiError),
        (status = 409, description = "A question is already in flight", body = ApiError),
    )
)]
pub async fn ask(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    AppJson(req): AppJson<AskRequest>,
) -> ApiResponse<ExchangeResponse> {
    ApiResponse::from_result(state.dashboard.ask(&session_id, &req.question).await)
}
