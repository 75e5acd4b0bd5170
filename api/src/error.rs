//! API Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bloomex_economics::EconomicsError;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Daily sell limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<EconomicsError> for ApiError {
    fn from(err: EconomicsError) -> Self {
        match err {
            EconomicsError::UnknownBucket(_)
            | EconomicsError::BucketNotFound(_)
            | EconomicsError::GrantNotFound(_)
            | EconomicsError::StakeNotFound(_) => ApiError::NotFound(err.to_string()),
            EconomicsError::ExceedsDailyLimit { .. } => ApiError::LimitExceeded(err.to_string()),
            EconomicsError::SerializationError(_) => ApiError::Internal(err.to_string()),
            _ => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::LimitExceeded(msg) => {
                (StatusCode::TOO_MANY_REQUESTS, "exceeds_daily_limit", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg),
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}
