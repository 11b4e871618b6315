//! v1 Week detail handler.

use axum::extract::{Path, State};

use crate::api::v1::dto::WeekViewResponse;
use crate::api::v1::response::{ApiError, ApiResponse, ErrorCode};
use crate::api::AppState;

/// `GET /api/v1/weeks/{week}`
#[utoipa::path(
    get,
    path = "/api/v1/weeks/{week}",
    tag = "weeks",
    operation_id = "weeks.get",
    params(
        ("week" = i64, Path, description = "Week number in 1..=totalWeeks"),
    ),
    responses(
        (status = 200, description = "Week detail with defaults for unauthored entries", body = WeekViewResponse),
        (status = 400, description = "Week is not a number or is out of range", body = ApiError),
    )
)]
pub async fn get_week(
    State(state): State<AppState>,
    Path(week): Path<String>,
) -> ApiResponse<WeekViewResponse> {
    let Ok(week) = week.trim().parse::<i64>() else {
        return ApiResponse::error(
            ErrorCode::InvalidRequest,
            format!("Week must be an integer, got '{week}'"),
        );
    };

    ApiResponse::from_result(state.dashboard.week_view(week))
}
