//! Sign Up Use Case
//!
//! Creates a new user account with profile and credentials, stores the
//! optional profile image and sends the verification email.

use std::sync::Arc;

use kernel::role::UserRole;
use platform::signed_token;

use crate::application::config::AuthConfig;
use crate::application::verify_email::EMAIL_VERIFY_PURPOSE;
use crate::domain::entity::{credentials::Credentials, profile::Profile, user::User};
use crate::domain::repository::{CredentialsRepository, ProfileRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, mobile_number::MobileNumber, user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};
use crate::infra::mailer::Mailer;
use crate::infra::media::{ImageUpload, MediaStore};

/// Sign up input (parsed from the multipart form)
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mobile_number: String,
    /// "passenger" (default) or "driver"
    pub role: Option<String>,
    pub profile_image: Option<ImageUpload>,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    pub profile: Profile,
}

/// Sign up use case
pub struct SignUpUseCase<R, M>
where
    R: UserRepository + CredentialsRepository + ProfileRepository,
    M: Mailer,
{
    repo: Arc<R>,
    mailer: Arc<M>,
    media: Arc<MediaStore>,
    config: Arc<AuthConfig>,
}

impl<R, M> SignUpUseCase<R, M>
where
    R: UserRepository + CredentialsRepository + ProfileRepository,
    M: Mailer,
{
    pub fn new(repo: Arc<R>, mailer: Arc<M>, media: Arc<MediaStore>, config: Arc<AuthConfig>) -> Self {
        Self {
            repo,
            mailer,
            media,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate value objects first so nothing is persisted on bad input
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(&input.email).map_err(AuthError::from)?;
        let mobile_number = MobileNumber::new(&input.mobile_number)
            .map_err(|e| AuthError::Validation(e.to_string()))?;

        let user_role = match input.role.as_deref() {
            None | Some("") => UserRole::default(),
            Some(code) => UserRole::from_code(code)
                .ok_or_else(|| AuthError::Validation(format!("Unknown role '{code}'")))?,
        };

        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;

        // Uniqueness pre-checks give field-specific messages; the unique
        // indexes still backstop races
        if self.repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }
        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.repo.exists_by_mobile_number(&mobile_number).await? {
            return Err(AuthError::MobileNumberTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Store the profile image before touching the database
        let image_path = match input.profile_image {
            Some(upload) => Some(self.media.save(upload).await?),
            None => None,
        };

        let user = User::new(user_name, user_role);
        let credentials = Credentials::new(user.user_id.clone(), password_hash);
        let profile = Profile::new(
            user.user_id.clone(),
            email.clone(),
            input.first_name,
            input.last_name,
            input.gender,
            Some(mobile_number),
            image_path.clone(),
        );

        if let Err(e) = self.insert_account(&user, &credentials, &profile).await {
            // A lost insert race must not leave the uploaded image behind
            if let Some(name) = &image_path {
                if let Err(remove_err) = self.media.remove(name).await {
                    tracing::warn!(error = %remove_err, "Failed to remove image after aborted signup");
                }
            }
            return Err(e);
        }

        // Verification delivery failures must not undo the signup
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
        if let Err(e) = self.mailer.send_verification(&email, &link).await {
            tracing::warn!(error = %e, "Failed to send verification email");
        }

        tracing::info!(
            public_id = %user.public_id,
            user_name = %user.user_name,
            role = %user.user_role,
            "User signed up"
        );

        Ok(SignUpOutput { user, profile })
    }

    async fn insert_account(
        &self,
        user: &User,
        credentials: &Credentials,
        profile: &Profile,
    ) -> AuthResult<()> {
        self.repo.create_user(user).await?;
        self.repo.create_credentials(credentials).await?;
        self.repo.create_profile(profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{public_id::PublicId, user_id::UserId};
    use crate::infra::mailer::LogMailer;
    use uuid::Uuid;

    /// Every uniqueness pre-check passes, then the insert itself fails,
    /// the shape of a signup losing a race against a concurrent request.
    struct RacedRepo;

    impl UserRepository for RacedRepo {
        async fn create_user(&self, _user: &User) -> AuthResult<()> {
            Err(AuthError::UserNameTaken)
        }
        async fn find_user_by_id(&self, _id: &UserId) -> AuthResult<Option<User>> {
            Ok(None)
        }
        async fn find_user_by_public_id(&self, _id: &PublicId) -> AuthResult<Option<User>> {
            Ok(None)
        }
        async fn find_user_by_name(&self, _name: &UserName) -> AuthResult<Option<User>> {
            Ok(None)
        }
        async fn exists_by_user_name(&self, _name: &UserName) -> AuthResult<bool> {
            Ok(false)
        }
        async fn update_user(&self, _user: &User) -> AuthResult<()> {
            Ok(())
        }
    }

    impl CredentialsRepository for RacedRepo {
        async fn create_credentials(&self, _credentials: &Credentials) -> AuthResult<()> {
            Ok(())
        }
        async fn find_credentials(&self, _id: &UserId) -> AuthResult<Option<Credentials>> {
            Ok(None)
        }
        async fn update_credentials(&self, _credentials: &Credentials) -> AuthResult<()> {
            Ok(())
        }
    }

    impl ProfileRepository for RacedRepo {
        async fn create_profile(&self, _profile: &Profile) -> AuthResult<()> {
            Ok(())
        }
        async fn find_profile(&self, _id: &UserId) -> AuthResult<Option<Profile>> {
            Ok(None)
        }
        async fn find_user_id_by_email(&self, _email: &Email) -> AuthResult<Option<UserId>> {
            Ok(None)
        }
        async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
            Ok(false)
        }
        async fn mobile_number_taken(
            &self,
            _mobile_number: &MobileNumber,
            _except: &UserId,
        ) -> AuthResult<bool> {
            Ok(false)
        }
        async fn exists_by_mobile_number(&self, _mobile_number: &MobileNumber) -> AuthResult<bool> {
            Ok(false)
        }
        async fn update_profile(&self, _profile: &Profile) -> AuthResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failed_insert_removes_stored_image() {
        let dir = std::env::temp_dir().join(format!("signup-test-{}", Uuid::new_v4()));
        let media = Arc::new(MediaStore::new(&dir));

        let use_case = SignUpUseCase::new(
            Arc::new(RacedRepo),
            Arc::new(LogMailer),
            Arc::clone(&media),
            Arc::new(AuthConfig::development()),
        );

        let result = use_case
            .execute(SignUpInput {
                user_name: "rider01".to_string(),
                email: "rider01@example.com".to_string(),
                password: "correct horse battery".to_string(),
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                gender: "female".to_string(),
                mobile_number: "+15551234567".to_string(),
                role: None,
                profile_image: Some(ImageUpload {
                    file_name: "me.png".to_string(),
                    bytes: vec![1, 2, 3],
                }),
            })
            .await;

        assert!(matches!(result, Err(AuthError::UserNameTaken)));

        let mut entries = tokio::fs::read_dir(&dir).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
