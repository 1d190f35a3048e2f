//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    credentials::Credentials, profile::Profile, session::Session, user::User,
};
use crate::domain::value_object::{
    email::Email, mobile_number::MobileNumber, public_id::PublicId, user_id::UserId,
    user_name::UserName,
};
use crate::error::AuthResult;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create_user(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_user_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by public ID
    async fn find_user_by_public_id(&self, public_id: &PublicId) -> AuthResult<Option<User>>;

    /// Find user by user name
    async fn find_user_by_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Update user
    async fn update_user(&self, user: &User) -> AuthResult<()>;
}

/// Credentials repository trait
#[trait_variant::make(CredentialsRepository: Send)]
pub trait LocalCredentialsRepository {
    /// Create credentials
    async fn create_credentials(&self, credentials: &Credentials) -> AuthResult<()>;

    /// Find credentials by user ID
    async fn find_credentials(&self, user_id: &UserId) -> AuthResult<Option<Credentials>>;

    /// Update credentials
    async fn update_credentials(&self, credentials: &Credentials) -> AuthResult<()>;
}

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Create a profile
    async fn create_profile(&self, profile: &Profile) -> AuthResult<()>;

    /// Find profile by user ID
    async fn find_profile(&self, user_id: &UserId) -> AuthResult<Option<Profile>>;

    /// Resolve a user ID from an email address
    async fn find_user_id_by_email(&self, email: &Email) -> AuthResult<Option<UserId>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Check if mobile number is used by a different user
    async fn mobile_number_taken(
        &self,
        mobile_number: &MobileNumber,
        except: &UserId,
    ) -> AuthResult<bool>;

    /// Check if mobile number exists at all
    async fn exists_by_mobile_number(&self, mobile_number: &MobileNumber) -> AuthResult<bool>;

    /// Update a profile
    async fn update_profile(&self, profile: &Profile) -> AuthResult<()>;
}

/// Session repository trait
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session
    async fn create_session(&self, session: &Session) -> AuthResult<()>;

    /// Find session by ID and verify fingerprint
    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<Session>>;

    /// Update session (e.g., last activity)
    async fn update_session(&self, session: &Session) -> AuthResult<()>;

    /// Delete a session
    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete all sessions for a user (except current)
    async fn delete_all_sessions(&self, user_id: &UserId, except: Option<Uuid>)
    -> AuthResult<u64>;

    /// Clean up expired sessions
    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}
