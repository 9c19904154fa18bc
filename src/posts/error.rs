use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Error types for post and comment operations
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Post not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<sqlx::Error> for PostError {
    fn from(err: sqlx::Error) -> Self {
        PostError::DatabaseError(err.to_string())
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PostError::DatabaseError(msg) => {
                tracing::error!("Database error in posts: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            PostError::NotFound => (StatusCode::NOT_FOUND, "Post not found".to_string()),
            PostError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}
