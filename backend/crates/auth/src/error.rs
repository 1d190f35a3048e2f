//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// User name already exists
    #[error("Username already exists. Please choose a different one.")]
    UserNameTaken,

    /// Email already registered
    #[error("An account with this email already exists")]
    EmailTaken,

    /// Mobile number already registered
    #[error("An account with this mobile number already exists")]
    MobileNumberTaken,

    /// Invalid credentials (unknown identifier or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account is locked (too many failed attempts)
    #[error("Account is temporarily locked")]
    AccountLocked,

    /// Account is disabled
    #[error("Account is disabled")]
    AccountDisabled,

    /// Email already verified (re-request of a verification link)
    #[error("Email is already verified")]
    AlreadyVerified,

    /// Verification/reset token is invalid or expired
    #[error("Link is invalid or has expired")]
    TokenInvalid,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Session fingerprint mismatch
    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Missing required header
    #[error("Missing required header: {0}")]
    MissingHeader(String),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Input validation error (value objects, form fields)
    #[error("{0}")]
    Validation(String),

    /// Uploaded image rejected
    #[error("Invalid image upload: {0}")]
    InvalidImage(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::UserNameTaken | AuthError::EmailTaken | AuthError::MobileNumberTaken => {
                StatusCode::CONFLICT
            }
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::AccountLocked => StatusCode::LOCKED,
            AuthError::AccountDisabled => StatusCode::FORBIDDEN,
            AuthError::SessionInvalid | AuthError::SessionFingerprintMismatch => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::AlreadyVerified
            | AuthError::TokenInvalid
            | AuthError::MissingHeader(_)
            | AuthError::PasswordValidation(_)
            | AuthError::Validation(_)
            | AuthError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken | AuthError::EmailTaken | AuthError::MobileNumberTaken => {
                ErrorKind::Conflict
            }
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::AccountLocked => ErrorKind::Locked,
            AuthError::AccountDisabled => ErrorKind::Forbidden,
            AuthError::AlreadyVerified
            | AuthError::TokenInvalid
            | AuthError::MissingHeader(_)
            | AuthError::PasswordValidation(_)
            | AuthError::Validation(_)
            | AuthError::InvalidImage(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::AccountLocked => {
                tracing::warn!("Login attempt on locked account");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::client::FingerprintError> for AuthError {
    fn from(err: platform::client::FingerprintError) -> Self {
        match err {
            platform::client::FingerprintError::MissingHeader(header) => {
                AuthError::MissingHeader(header)
            }
        }
    }
}
