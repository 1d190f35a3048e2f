//! Value Object Module

pub mod email;
pub mod mobile_number;
pub mod public_id;
pub mod user_id;
pub mod user_name;
pub mod user_password;

// UserRole lives in kernel so that rides/chat can share it
pub use kernel::role::UserRole;
