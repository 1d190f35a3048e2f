//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Common primitive value objects (ID types, user roles)
//! - The authenticated-identity extractor shared by all HTTP crates
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod role;

#[cfg(feature = "axum")]
pub mod auth;

#[cfg(feature = "axum")]
pub use auth::CurrentUser;
