use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Journey API",
        version = "1.0.0",
        description = "Health journey dashboard: week timeline, metric status, intervention overlays and a history-grounded assistant.",
    ),
    paths(
        handlers::health::health_check,
        handlers::member::get_member,
        handlers::member::get_timeline,
        handlers::metrics::get_snapshot,
        handlers::metrics::get_series,
        handlers::weeks::get_week,
        handlers::sessions::create_session,
        handlers::sessions::list_messages,
        handlers::sessions::ask,
    ),
    components(schemas(
        // Response envelope
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        // Member
        dto::MemberResponse,
        dto::TimelineEntryResponse,
        // Metrics
        dto::V1StatusClass,
        dto::V1TrendDirection,
        dto::SamplePoint,
        dto::TrendResponse,
        dto::SnapshotResponse,
        dto::InterventionResponse,
        dto::ChartPoint,
        dto::OptimalRangeResponse,
        dto::SeriesResponse,
        // Weeks
        dto::WeekSummaryResponse,
        dto::V1DeviceState,
        dto::DeviceStatusResponse,
        dto::QuestionLogResponse,
        dto::WeekViewResponse,
        // Assistant
        dto::AskRequest,
        dto::V1Sender,
        dto::MessageResponse,
        dto::SessionResponse,
        dto::V1ExchangeStatus,
        dto::ExchangeResponse,
        // Health (handler-local types)
        handlers::health::HealthData,
        handlers::health::RecordStatus,
        handlers::health::LlmStatus,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "member", description = "Tracked member and master timeline"),
        (name = "metrics", description = "Metric snapshots and annotated series"),
        (name = "weeks", description = "Per-week detail"),
        (name = "assistant", description = "Grounded question answering over the conversation history"),
    ),
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
