//! Sign In Use Case
//!
//! Verifies credentials for a username or email identifier, enforces the
//! lockout policy and opens a server-side session.

use std::sync::Arc;

use kernel::role::UserRole;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::{
    CredentialsRepository, ProfileRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::{email::Email, user_name::UserName, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    /// Username or email address
    pub identifier: String,
    pub password: String,
    pub remember_me: bool,
    pub fingerprint_hash: Vec<u8>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    pub session_token: String,
    pub public_id: String,
    pub user_name: String,
    pub role: UserRole,
    pub remember_me: bool,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: UserRepository + CredentialsRepository + ProfileRepository + SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> SignInUseCase<R>
where
    R: UserRepository + CredentialsRepository + ProfileRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Identifier lookup must not reveal which part failed
        let user = if input.identifier.contains('@') {
            let email = Email::new(&input.identifier).map_err(|_| AuthError::InvalidCredentials)?;
            match self.repo.find_user_id_by_email(&email).await? {
                Some(user_id) => self.repo.find_user_by_id(&user_id).await?,
                None => None,
            }
        } else {
            let user_name =
                UserName::new(&input.identifier).map_err(|_| AuthError::InvalidCredentials)?;
            self.repo.find_user_by_name(&user_name).await?
        };
        let mut user = user.ok_or(AuthError::InvalidCredentials)?;

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        let mut credentials = self
            .repo
            .find_credentials(&user.user_id)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if credentials.is_locked() {
            tracing::warn!(public_id = %user.public_id, "Login attempt on locked account");
            return Err(AuthError::AccountLocked);
        }

        let verified = match RawPassword::new(input.password) {
            Ok(raw) => credentials.password_hash.verify(&raw, self.config.pepper()),
            // Input that cannot be a valid password cannot match a hash
            Err(_) => false,
        };

        if !verified {
            credentials.record_failure();
            self.repo.update_credentials(&credentials).await?;
            return Err(AuthError::InvalidCredentials);
        }

        credentials.reset_failures();
        self.repo.update_credentials(&credentials).await?;

        user.record_login();
        self.repo.update_user(&user).await?;

        let ttl_ms = if input.remember_me {
            self.config.session_ttl_long_ms()
        } else {
            self.config.session_ttl_short_ms()
        };
        let session = Session::new(
            user.user_id.clone(),
            user.public_id.clone(),
            user.user_role,
            input.remember_me,
            input.fingerprint_hash,
            input.client_ip,
            input.user_agent,
            chrono::Duration::milliseconds(ttl_ms),
        );
        self.repo.create_session(&session).await?;

        let token = session_token::generate(&self.config.session_secret, session.session_id);

        tracing::info!(
            public_id = %user.public_id,
            remember_me = input.remember_me,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: token,
            public_id: user.public_id.to_string(),
            user_name: user.user_name.to_string(),
            role: user.user_role,
            remember_me: input.remember_me,
        })
    }
}
