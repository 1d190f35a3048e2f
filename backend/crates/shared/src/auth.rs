//! Authenticated Identity
//!
//! `CurrentUser` is inserted into request extensions by the auth
//! middleware and extracted here, so downstream crates (rides, chat)
//! consume identity without depending on the auth crate.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::app_error::AppError;
use crate::role::UserRole;

/// The authenticated user for the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Internal UUID (database key)
    pub user_id: Uuid,
    /// Public-facing nanoid (API responses, logs)
    pub public_id: String,
    /// Role at session creation
    pub role: UserRole,
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}
