//! Chat Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;

pub type ChatResult<T> = Result<T, ChatError>;

/// Errors for ride-thread messaging
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Ride not found")]
    RideNotFound,

    #[error("You are not a member of this ride's chat")]
    NotAMember,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChatError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ChatError::RideNotFound => StatusCode::NOT_FOUND,
            ChatError::NotAMember => StatusCode::FORBIDDEN,
            ChatError::Validation(_) => StatusCode::BAD_REQUEST,
            ChatError::Database(_) | ChatError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ChatError::RideNotFound => ErrorKind::NotFound,
            ChatError::NotAMember => ErrorKind::Forbidden,
            ChatError::Validation(_) => ErrorKind::BadRequest,
            ChatError::Database(_) | ChatError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            ChatError::Database(_) | ChatError::Internal(_) => {
                AppError::new(self.kind(), "An internal error occurred")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            ChatError::Database(e) => {
                tracing::error!(error = %e, "Chat database error");
            }
            ChatError::Internal(msg) => {
                tracing::error!(message = %msg, "Chat internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Chat request rejected");
            }
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ChatError::RideNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ChatError::NotAMember.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ChatError::Validation("empty".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
