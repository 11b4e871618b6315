//! v1 Metric handlers.

use axum::extract::{Path, State};

use crate::api::v1::dto::{SeriesResponse, SnapshotResponse};
use crate::api::v1::response::{ApiError, ApiResponse};
use crate::api::AppState;
use crate::models::MetricKind;

/// `GET /api/v1/metrics/{metric}/snapshot`
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{metric}/snapshot",
    tag = "metrics",
    operation_id = "metrics.snapshot",
    params(
        ("metric" = String, Path, description = "`blood_pressure` or `adherence`"),
    ),
    responses(
        (status = 200, description = "Latest value, sparkline window, status and trend", body = SnapshotResponse),
        (status = 404, description = "Unknown metric", body = ApiError),
    )
)]
pub async fn get_snapshot(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> ApiResponse<SnapshotResponse> {
    ApiResponse::from_result(
        metric
            .parse::<MetricKind>()
            .map(|metric| state.dashboard.current_snapshot(metric)),
    )
}

/// `GET /api/v1/metrics/{metric}/series`
#[utoipa::path(
    get,
    path = "/api/v1/metrics/{metric}/series",
    tag = "metrics",
    operation_id = "metrics.series",
    params(
        ("metric" = String, Path, description = "`blood_pressure` or `adherence`"),
    ),
    responses(
        (status = 200, description = "Full series annotated with interventions", body = SeriesResponse),
        (status = 404, description = "Unknown metric", body = ApiError),
    )
)]
pub async fn get_series(
    State(state): State<AppState>,
    Path(metric): Path<String>,
) -> ApiResponse<SeriesResponse> {
    ApiResponse::from_result(
        metric
            .parse::<MetricKind>()
            .map(|metric| state.dashboard.annotated_series(metric)),
    )
}
