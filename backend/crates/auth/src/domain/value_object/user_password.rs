//! User Password Value Object
//!
//! Thin domain wrapper over `platform::password`: `RawPassword` is the
//! validated clear text from a signup or reset form, `UserPassword` is
//! the Argon2id hash that goes in `auth_credentials`.

use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

/// Clear text password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate the password and translate policy failures into the
    /// user-facing error vocabulary.
    pub fn new(raw: String) -> AppResult<Self> {
        match ClearTextPassword::new(raw) {
            Ok(clear_text) => Ok(Self(clear_text)),
            Err(e) => Err(policy_error(e)),
        }
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_error(e: PasswordPolicyError) -> AppError {
    match e {
        PasswordPolicyError::TooShort { min, actual } => AppError::bad_request(format!(
            "Password must be at least {min} characters (got {actual})"
        ))
        .with_action("Please choose a longer password"),

        PasswordPolicyError::TooLong { max, actual } => AppError::bad_request(format!(
            "Password must be at most {max} characters (got {actual})"
        ))
        .with_action("Please choose a shorter password"),

        PasswordPolicyError::EmptyOrWhitespace => {
            AppError::bad_request("Password cannot be empty").with_action("Please enter a password")
        }

        PasswordPolicyError::InvalidCharacter => {
            AppError::bad_request("Password contains invalid characters")
                .with_action("Please remove any special control characters")
        }

        PasswordPolicyError::CommonPattern => {
            AppError::bad_request("Password is too common or follows a predictable pattern")
                .with_action("Please choose a more unique password")
        }
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Stored password hash in PHC string form
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash a validated raw password, mixing in the configured pepper
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw.inner().hash(pepper).map_err(|e| match e {
            PasswordHashError::HashingFailed(msg) => {
                AppError::internal(format!("Password hashing failed: {msg}"))
            }
            _ => AppError::internal("Unexpected error during password hashing"),
        })?;

        Ok(Self(hashed))
    }

    /// Rehydrate from the stored column; a malformed hash is a data bug,
    /// not a user error.
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string).map_err(|_| {
            AppError::new(
                ErrorKind::InternalServerError,
                "Invalid password hash in database",
            )
        })?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }

    pub fn needs_rehash(&self) -> bool {
        self.0.needs_rehash()
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

impl fmt::Display for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[HASHED_PASSWORD]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

    #[test]
    fn test_policy_rejections() {
        assert!(RawPassword::new("a".repeat(MIN_PASSWORD_LENGTH - 1)).is_err());
        assert!(RawPassword::new("b".repeat(MAX_PASSWORD_LENGTH + 1)).is_err());
        assert!(RawPassword::new("password123".to_string()).is_err());
        assert!(RawPassword::new(String::new()).is_err());
    }

    #[test]
    fn test_policy_acceptance() {
        assert!(RawPassword::new("ValidPass123!".to_string()).is_ok());
        assert!(RawPassword::new("最も！！安全なパスワード".to_string()).is_ok());
    }

    #[test]
    fn test_verify_matches_only_original() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();

        assert!(stored.verify(&raw, None));

        let other = RawPassword::new("WrongPassword123!".to_string()).unwrap();
        assert!(!stored.verify(&other, None));
    }

    #[test]
    fn test_pepper_is_part_of_the_secret() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, Some(b"app_secret_pepper")).unwrap();

        assert!(stored.verify(&raw, Some(b"app_secret_pepper")));
        assert!(!stored.verify(&raw, None));
        assert!(!stored.verify(&raw, Some(b"wrong")));
    }

    #[test]
    fn test_survives_storage_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let stored = UserPassword::from_raw(&raw, None).unwrap();

        let column = stored.as_phc_string().to_string();
        let restored = UserPassword::from_phc_string(column).unwrap();
        assert!(restored.verify(&raw, None));
    }

    #[test]
    fn test_never_prints_the_secret() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        let debug = format!("{raw:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("Secret"));

        let stored = UserPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{stored:?}").contains("HASH"));
    }
}
