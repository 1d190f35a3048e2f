//! Password Reset Use Case
//!
//! Stateless reset links signed with the application secret. Requesting a
//! reset never reveals whether an address is registered.

use std::sync::Arc;

use platform::signed_token;

use crate::application::config::AuthConfig;
use crate::domain::repository::{CredentialsRepository, ProfileRepository, SessionRepository};
use crate::domain::value_object::{
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::infra::mailer::Mailer;

/// Purpose tag baked into reset tokens
pub const PASSWORD_RESET_PURPOSE: &str = "password-reset";

/// Password reset use case
pub struct ResetPasswordUseCase<R, M>
where
    R: CredentialsRepository + ProfileRepository + SessionRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R, M> ResetPasswordUseCase<R, M>
where
    R: CredentialsRepository + ProfileRepository + SessionRepository,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    /// Send a reset link if the address is registered.
    ///
    /// Returns Ok either way so the endpoint cannot be used to enumerate
    /// accounts.
    pub async fn request(&self, email: &str) -> AuthResult<()> {
        let email = match Email::new(email) {
            Ok(e) => e,
            Err(_) => return Ok(()),
        };

        if self.repo.find_user_id_by_email(&email).await?.is_none() {
            tracing::debug!("Password reset requested for unknown address");
            return Ok(());
        }

        let token = signed_token::issue(
            &self.config.session_secret,
            PASSWORD_RESET_PURPOSE,
            email.as_str(),
            self.config.reset_token_ttl_secs(),
        );
        let link = format!(
            "{}/api/v1/auth/reset-password/{}",
            self.config.public_base_url, token
        );
        if let Err(e) = self.mailer.send_password_reset(&email, &link).await {
            tracing::warn!(error = %e, "Failed to send password reset email");
        }

        Ok(())
    }

    /// Set a new password from a reset link and revoke every open session
    pub async fn confirm(
        &self,
        token: &str,
        new_password: String,
        confirm_password: String,
    ) -> AuthResult<()> {
        if new_password != confirm_password {
            return Err(AuthError::Validation("Passwords do not match".to_string()));
        }

        let subject =
            signed_token::verify(&self.config.session_secret, PASSWORD_RESET_PURPOSE, token)
                .map_err(|_| AuthError::TokenInvalid)?;
        let email = Email::new(subject).map_err(|_| AuthError::TokenInvalid)?;

        let user_id = self
            .repo
            .find_user_id_by_email(&email)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        let raw = RawPassword::new(new_password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let hash = UserPassword::from_raw(&raw, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let mut credentials = self
            .repo
            .find_credentials(&user_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;
        credentials.update_password(hash);
        credentials.reset_failures();
        self.repo.update_credentials(&credentials).await?;

        // A reset invalidates every session, including the current one
        let revoked = self.repo.delete_all_sessions(&user_id, None).await?;
        tracing::info!(sessions_revoked = revoked, "Password reset completed");

        Ok(())
    }
}
