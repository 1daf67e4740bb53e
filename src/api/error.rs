use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Category name already in use: {0}")]
    DuplicateName(String),

    #[error("Username already in use: {0}")]
    DuplicateUsername(String),

    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    #[error("Invalid reference: {0}")]
    ReferenceInvalid(String),

    #[error("Unknown sort field: {0}")]
    InvalidSortField(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::DuplicateName(name) => (
                StatusCode::CONFLICT,
                format!("Category name already in use: {}", name),
            ),
            AppError::DuplicateUsername(username) => (
                StatusCode::CONFLICT,
                format!("Username already in use: {}", username),
            ),
            AppError::DuplicateEmail(email) => (
                StatusCode::CONFLICT,
                format!("Email already in use: {}", email),
            ),
            AppError::ReferenceInvalid(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InvalidSortField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown sort field: {}", field),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            AppError::Anyhow(e) => {
                tracing::error!("Anyhow error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
