//! # V1 API Response Envelope & Error Contract
//!
//! Every v1 endpoint returns an [`ApiResponse<T>`] envelope:
//!
//! ```json
//! {
//!   "data": { ... },                 // present on success, absent on error
//!   "meta": { "total": 32 },         // optional, list endpoints only
//!   "error": { "code": "not_found", "message": "..." }  // present on error
//! }
//! ```
//!
//! Session ids are nanoids, 21 characters (e.g. `"V1StGXR8_Z5jdHi6B-myT"`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::JourneyError;

/// Machine-readable error code included in every error response.
///
/// Serialized as a snake_case string on the wire (e.g. `"invalid_request"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed request, bad parameters or an out-of-range week. HTTP 400.
    InvalidRequest,
    /// Unknown metric or session. HTTP 404.
    NotFound,
    /// A question is already being answered in this session. HTTP 409.
    Conflict,
    /// An unexpected server-side error occurred. Internal details are never
    /// leaked to the client. HTTP 500.
    InternalError,
}

impl ErrorCode {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequest => write!(f, "invalid_request"),
            Self::NotFound => write!(f, "not_found"),
            Self::Conflict => write!(f, "conflict"),
            Self::InternalError => write!(f, "internal_error"),
        }
    }
}

/// Structured error payload within the API envelope.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub code: ErrorCode,
    /// Human-readable description safe to display to end users.
    pub message: String,
}

/// Metadata for list responses.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,

    /// HTTP status to use in the response. Not serialized on the wire.
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    fn with_data(data: T, meta: Option<ResponseMeta>, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            meta,
            error: None,
            status,
        }
    }

    pub fn success(data: T) -> Self {
        Self::with_data(data, None, StatusCode::OK)
    }

    /// Success for a list of `total` items.
    pub fn success_with_total(data: T, total: usize) -> Self {
        let meta = ResponseMeta {
            total: total as u64,
        };
        Self::with_data(data, Some(meta), StatusCode::OK)
    }

    pub fn created(data: T) -> Self {
        Self::with_data(data, None, StatusCode::CREATED)
    }

    /// Error response. HTTP status is derived from the [`ErrorCode`].
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        let status = code.status();
        Self {
            data: None,
            meta: None,
            error: Some(ApiError {
                code,
                message: message.into(),
            }),
            status,
        }
    }

    /// Map a service result into the envelope.
    pub fn from_result<U: Into<T>>(result: crate::error::Result<U>) -> Self {
        match result {
            Ok(value) => Self::success(value.into()),
            Err(e) => e.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = self.status;
        match serde_json::to_value(&self) {
            Ok(body) => (status, Json(body)).into_response(),
            Err(_) => {
                let body = serde_json::json!({
                    "error": {
                        "code": "internal_error",
                        "message": "An internal error occurred"
                    }
                });
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl<T: Serialize> From<JourneyError> for ApiResponse<T> {
    /// Internal error details are never leaked to the client; the real error
    /// is logged instead.
    fn from(err: JourneyError) -> Self {
        match err {
            JourneyError::NotFound(ref msg) => ApiResponse::error(ErrorCode::NotFound, msg.clone()),

            JourneyError::Validation(ref msg) => {
                ApiResponse::error(ErrorCode::InvalidRequest, msg.clone())
            }

            ref out_of_range @ JourneyError::OutOfRange { .. } => {
                ApiResponse::error(ErrorCode::InvalidRequest, out_of_range.to_string())
            }

            JourneyError::Json(ref e) => {
                ApiResponse::error(ErrorCode::InvalidRequest, format!("Invalid JSON: {e}"))
            }

            ref in_flight @ JourneyError::ExchangeInFlight { .. } => {
                ApiResponse::error(ErrorCode::Conflict, in_flight.to_string())
            }

            ref internal @ (JourneyError::EmptySeries { .. }
            | JourneyError::MissingCredential(_)
            | JourneyError::UpstreamFailure(_)
            | JourneyError::LlmUnavailable(_)
            | JourneyError::Io(_)
            | JourneyError::Internal(_)) => {
                tracing::error!(error = %internal, "Internal error mapped to v1 response");
                ApiResponse::error(ErrorCode::InternalError, "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for JourneyError {
    fn into_response(self) -> Response {
        ApiResponse::<()>::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_response_serializes_without_error() {
        let resp = ApiResponse::success("hello");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["data"], "hello");
        assert!(json.get("error").is_none());
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn error_response_serializes_without_data() {
        let resp = ApiResponse::<()>::error(ErrorCode::NotFound, "gone");
        let json = serde_json::to_value(&resp).expect("serialize");
        assert!(json.get("data").is_none());
        assert_eq!(json["error"]["code"], "not_found");
        assert_eq!(json["error"]["message"], "gone");
    }

    #[test]
    fn list_response_carries_total() {
        let resp = ApiResponse::success_with_total(vec![1, 2, 3], 3);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["meta"]["total"], 3);
    }

    #[test]
    fn created_response_has_201_status() {
        let resp = ApiResponse::created("session");
        assert_eq!(resp.status, StatusCode::CREATED);
    }

    #[test]
    fn out_of_range_maps_to_invalid_request() {
        let resp: ApiResponse<()> = JourneyError::out_of_range(40, 32).into();
        let err = resp.error.as_ref().expect("error");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert!(err.message.contains("40"));
    }

    #[test]
    fn exchange_in_flight_maps_to_conflict() {
        let resp: ApiResponse<()> = JourneyError::ExchangeInFlight {
            session_id: "abc".into(),
        }
        .into();
        assert_eq!(resp.status, StatusCode::CONFLICT);
    }

    #[test]
    fn internal_errors_do_not_leak() {
        let resp: ApiResponse<()> = JourneyError::Internal("secret debug info".into()).into();
        let err = resp.error.as_ref().expect("error");
        assert_eq!(err.code, ErrorCode::InternalError);
        assert_eq!(err.message, "An internal error occurred");
    }
}
