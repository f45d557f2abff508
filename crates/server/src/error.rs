use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use jarvis::{CapabilityError, StoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            ApiError::Capability(CapabilityError::MissingParameter(_)) => StatusCode::BAD_REQUEST,
            ApiError::Capability(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let error_message = match &self {
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::InternalError(msg) => msg.clone(),
            other => other.to_string(),
        };

        if status_code.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status_code, Json(serde_json::json!({ "error": error_message }))).into_response()
    }
}
