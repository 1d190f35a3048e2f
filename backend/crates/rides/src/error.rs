//! Rides Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;

pub type RideResult<T> = Result<T, RideError>;

/// Errors for ride offers and bookings
#[derive(Debug, thiserror::Error)]
pub enum RideError {
    #[error("Ride not found")]
    RideNotFound,

    #[error("Destination is required")]
    DestinationRequired,

    #[error("Vehicle plate is already registered")]
    PlateTaken,

    #[error("No seats left on this ride")]
    NoSeatsLeft,

    #[error("You have already booked this ride")]
    AlreadyBooked,

    #[error("Drivers cannot book their own ride")]
    CannotBookOwnRide,

    #[error("Only drivers can perform this action")]
    DriversOnly,

    #[error("Only passengers can perform this action")]
    PassengersOnly,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RideError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // The original surface answers 404 when no destination is given
            RideError::RideNotFound | RideError::DestinationRequired => StatusCode::NOT_FOUND,
            RideError::PlateTaken | RideError::NoSeatsLeft | RideError::AlreadyBooked => {
                StatusCode::CONFLICT
            }
            RideError::CannotBookOwnRide
            | RideError::DriversOnly
            | RideError::PassengersOnly => StatusCode::FORBIDDEN,
            RideError::Validation(_) => StatusCode::BAD_REQUEST,
            RideError::Database(_) | RideError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            RideError::RideNotFound | RideError::DestinationRequired => ErrorKind::NotFound,
            RideError::PlateTaken | RideError::NoSeatsLeft | RideError::AlreadyBooked => {
                ErrorKind::Conflict
            }
            RideError::CannotBookOwnRide
            | RideError::DriversOnly
            | RideError::PassengersOnly => ErrorKind::Forbidden,
            RideError::Validation(_) => ErrorKind::BadRequest,
            RideError::Database(_) | RideError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            RideError::Database(_) | RideError::Internal(_) => {
                AppError::new(self.kind(), "An internal error occurred")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            RideError::Database(e) => {
                tracing::error!(error = %e, "Ride database error");
            }
            RideError::Internal(msg) => {
                tracing::error!(message = %msg, "Ride internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Ride request rejected");
            }
        }
    }
}

impl IntoResponse for RideError {
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
        assert_eq!(RideError::RideNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            RideError::DestinationRequired.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(RideError::NoSeatsLeft.status_code(), StatusCode::CONFLICT);
        assert_eq!(RideError::AlreadyBooked.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            RideError::CannotBookOwnRide.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(RideError::DriversOnly.status_code(), StatusCode::FORBIDDEN);
    }
}
