//! Email Verification Use Case
//!
//! Issues signed verification links and confirms them. The link subject is
//! the email address itself, so a verified token resolves back to the
//! profile without any server-side token storage.

use std::sync::Arc;

use platform::signed_token;

use crate::application::config::AuthConfig;
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};
use crate::infra::mailer::Mailer;

/// Purpose tag baked into verification tokens
pub const EMAIL_VERIFY_PURPOSE: &str = "email-verify";

/// Email verification use case
pub struct VerifyEmailUseCase<R: ProfileRepository, M: Mailer> {
    repo: Arc<R>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<R: ProfileRepository, M: Mailer> VerifyEmailUseCase<R, M> {
    pub fn new(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            config,
        }
    }

    /// Send a fresh verification link to an unverified address
    pub async fn request(&self, email: &str) -> AuthResult<()> {
        let email = Email::new(email).map_err(AuthError::from)?;

        let user_id = self
            .repo
            .find_user_id_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let profile = self
            .repo
            .find_profile(&user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if profile.email_verified {
            return Err(AuthError::AlreadyVerified);
        }

        let token = signed_token::issue(
            &self.config.session_secret,
            EMAIL_VERIFY_PURPOSE,
            email.as_str(),
            self.config.verification_token_ttl_secs(),
        );
        let link = format!(
            "{}/api/v1/auth/verify/{}",
            self.config.public_base_url, token
        );
        self.mailer
            .send_verification(&email, &link)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(())
    }

    /// Confirm a verification link and mark the profile as verified
    pub async fn confirm(&self, token: &str) -> AuthResult<()> {
        let subject = signed_token::verify(&self.config.session_secret, EMAIL_VERIFY_PURPOSE, token)
            .map_err(|_| AuthError::TokenInvalid)?;
        let email = Email::new(subject).map_err(|_| AuthError::TokenInvalid)?;

        let user_id = self
            .repo
            .find_user_id_by_email(&email)
            .await?
            .ok_or(AuthError::TokenInvalid)?;
        let mut profile = self
            .repo
            .find_profile(&user_id)
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        // Re-verifying an already verified address is harmless
        if !profile.email_verified {
            profile.mark_email_verified();
            self.repo.update_profile(&profile).await?;
        }

        tracing::info!(email = %email, "Email address verified");
        Ok(())
    }
}
