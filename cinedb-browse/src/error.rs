//! Error types for cinedb-browse

use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Result type for API handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API error type, rendered as `{"error": message}`
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (500)
    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Common(#[from] cinedb_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) | ApiError::Common(cinedb_common::Error::InvalidInput(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) | ApiError::Common(cinedb_common::Error::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            ApiError::Internal(_) | ApiError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_errors_render_as_json() {
        let response = ApiError::BadRequest("page must be a number".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid request: page must be a number");
    }

    #[test]
    fn test_common_errors_keep_their_status() {
        let invalid = ApiError::from(cinedb_common::Error::InvalidInput("x".into()));
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let missing = ApiError::from(cinedb_common::Error::NotFound("x".into()));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }
}
