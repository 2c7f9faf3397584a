//! Error taxonomy shared by the stores, services and HTTP layer.
//!
//! Every failure a caller can act on has its own variant: a deleted gallery
//! (`NotFound`) and a gallery owned by someone else (`Authorization`) never
//! collapse into one generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input, correctable by the user.
    #[error("{0}")]
    Validation(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: String },

    /// The actor is known but lacks rights for the requested action.
    #[error("{0}")]
    Authorization(String),

    /// Uniqueness race on room creation.
    #[error("{0}")]
    Conflict(String),

    /// A remote collaborator could not be reached or answered garbage.
    #[error("remote call failed: {0}")]
    Transport(String),

    #[error("authentication required")]
    Unauthenticated,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        AppError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Authorization(_) => "AUTHORIZATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Transport(_) => "TRANSPORT_ERROR",
            AppError::Unauthenticated => "UNAUTHENTICATED",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Authorization(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Transport(_) => StatusCode::BAD_GATEWAY,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        // Storage details stay in the logs.
        let message = match &self {
            AppError::Database(e) => {
                tracing::error!("database error: {:?}", e);
                "internal storage error".to_string()
            }
            other => other.to_string(),
        };

        (
            status,
            Json(json!({
                "status": "failed",
                "code": self.code(),
                "error": message,
            })),
        )
            .into_response()
    }
}
