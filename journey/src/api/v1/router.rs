use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;

pub fn v1_router() -> Router<AppState> {
    let metrics = Router::new()
        .route("/{metric}/snapshot", get(handlers::metrics::get_snapshot))
        .route("/{metric}/series", get(handlers::metrics::get_series));

    let sessions = Router::new()
        .route("/", post(handlers::sessions::create_session))
        .route(
            "/{sessionId}/messages",
            get(handlers::sessions::list_messages).post(handlers::sessions::ask),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router())
        .route("/member", get(handlers::member::get_member))
        .route("/timeline", get(handlers::member::get_timeline))
        .route("/weeks/{week}", get(handlers::weeks::get_week))
        .nest("/metrics", metrics)
        .nest("/sessions", sessions)
}
