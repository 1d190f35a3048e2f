//! Sign Out Use Case
//!
//! Deletes the server-side session referenced by a session token.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<R: SessionRepository> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: SessionRepository> SignOutUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Delete the session. A token that no longer maps to a session is not
    /// an error, logout is idempotent.
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let session_id = match session_token::parse(&self.config.session_secret, token) {
            Ok(id) => id,
            Err(_) => return Ok(()),
        };

        self.repo.delete_session(session_id).await?;
        tracing::debug!(%session_id, "Session deleted on sign out");
        Ok(())
    }
}
