//! API Error Types

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use storage::StorageError;
use thiserror::Error;
use tracing::error;

/// Errors a request can end in
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid location format. Use only letters, numbers, dashes, and underscores (2-50 characters).")]
    InvalidLocation,

    #[error("Temperature query parameter (temp) is required")]
    MissingTemperature,

    #[error("Invalid temperature value. Must be a number between -100°C and 100°C")]
    InvalidTemperature,

    /// Request could not be extracted (bad path segment or query string)
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidLocation
            | ApiError::MissingTemperature
            | ApiError::InvalidTemperature
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Storage(err) = &self {
            error!("Storage failure: {}", err);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_bad_request() {
        assert_eq!(ApiError::InvalidLocation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingTemperature.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidTemperature.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::BadRequest("duplicate field".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_storage_error_passes_message_through() {
        let err = ApiError::from(StorageError::Database("disk I/O error".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "disk I/O error");
    }
}
