//! v1 Member and timeline handlers.

use axum::extract::State;

use crate::api::v1::dto::{MemberResponse, TimelineEntryResponse};
use crate::api::v1::response::ApiResponse;
use crate::api::AppState;

/// `GET /api/v1/member`
#[utoipa::path(
    get,
    path = "/api/v1/member",
    tag = "member",
    operation_id = "member.get",
    responses(
        (status = 200, description = "Tracked member", body = MemberResponse),
    )
)]
pub async fn get_member(State(state): State<AppState>) -> ApiResponse<MemberResponse> {
    ApiResponse::success(MemberResponse::from(state.dashboard.member()))
}

/// `GET /api/v1/timeline`
#[utoipa::path(
    get,
    path = "/api/v1/timeline",
    tag = "member",
    operation_id = "timeline.list",
    responses(
        (status = 200, description = "One entry per tracked week, in week order", body = Vec<TimelineEntryResponse>),
    )
)]
pub async fn get_timeline(State(state): State<AppState>) -> ApiResponse<Vec<TimelineEntryResponse>> {
    let entries: Vec<TimelineEntryResponse> = state
        .dashboard
        .timeline()
        .iter()
        .map(TimelineEntryResponse::from)
        .collect();
    let total = entries.len();
    ApiResponse::success_with_total(entries, total)
}
