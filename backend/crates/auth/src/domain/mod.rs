//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{credentials::Credentials, profile::Profile, session::Session, user::User};
pub use repository::{
    CredentialsRepository, ProfileRepository, SessionRepository, UserRepository,
};
