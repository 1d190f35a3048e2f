//! Application Layer
//!
//! Use cases orchestrating domain entities and repositories.

pub mod check_session;
pub mod config;
pub mod profile;
pub mod reset_password;
pub mod session_token;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod verify_email;

pub use check_session::{CheckSessionUseCase, SessionStatus};
pub use config::AuthConfig;
pub use profile::{GetProfileUseCase, ProfileEdit, UpdateProfileUseCase};
pub use reset_password::ResetPasswordUseCase;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_email::VerifyEmailUseCase;
