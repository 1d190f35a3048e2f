//! User Name Value Object
//!
//! The username is the public handle a user logs in and is displayed
//! with. Input is NFKC-normalized and trimmed; the canonical form is
//! lowercase and used for uniqueness checks, while the original casing
//! is preserved for display.
//!
//! ## Invariants
//! - 3 to 32 characters after normalization
//! - ASCII only: a-z, 0-9, `_`, `.`, `-`
//! - Starts and ends with a letter, digit or `_`
//! - No consecutive dots
//! - At least one letter or digit
//! - Not a reserved word

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length for user name (in characters)
pub const USER_NAME_MIN_LENGTH: usize = 3;

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 32;

/// Allowed special characters in user name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Names that collide with routes or operational accounts
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "support",
    "help",
    "api",
    "auth",
    "login",
    "logout",
    "signup",
    "register",
    "password",
    "reset",
    "verify",
    "users",
    "profile",
    "rides",
    "messages",
    "media",
    "me",
    "null",
    "undefined",
    "anonymous",
    "guest",
];

/// Error returned when user name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
    InvalidStart { char: char },
    InvalidEnd { char: char },
    ConsecutiveDots,
    NoAlphanumeric,
    Reserved { word: String },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only a-z, 0-9, _, ., - are allowed"
                )
            }
            Self::InvalidStart { char } => {
                write!(f, "Username cannot start with '{char}'")
            }
            Self::InvalidEnd { char } => {
                write!(f, "Username cannot end with '{char}'")
            }
            Self::ConsecutiveDots => {
                write!(f, "Username cannot contain consecutive dots (..)")
            }
            Self::NoAlphanumeric => {
                write!(f, "Username must contain at least one letter or digit")
            }
            Self::Reserved { word } => {
                write!(f, "'{word}' is a reserved username")
            }
        }
    }
}

impl std::error::Error for UserNameError {}

/// Validated, normalized user name
///
/// # Storage
/// - `original`: The user's input (trimmed, NFKC normalized, preserves case)
/// - `canonical`: Lowercase form for uniqueness checks
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Create a new UserName from raw input
    ///
    /// Applies normalization (NFKC, trim) and validates.
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original: String = input.as_ref().nfkc().collect::<String>().trim().to_string();
        let canonical = original.to_lowercase();
        Self::validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Get the original user name (preserves case)
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Get the canonical (lowercase) user name
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(original: &str) -> Result<Self, UserNameError> {
        Ok(Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        })
    }

    fn validate(canonical: &str) -> Result<(), UserNameError> {
        if canonical.is_empty() {
            return Err(UserNameError::Empty);
        }

        let length = canonical.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(UserNameError::TooShort {
                length,
                min: USER_NAME_MIN_LENGTH,
            });
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(UserNameError::TooLong {
                length,
                max: USER_NAME_MAX_LENGTH,
            });
        }

        for (pos, ch) in canonical.chars().enumerate() {
            if !Self::is_valid_char(ch) {
                return Err(UserNameError::InvalidCharacter {
                    char: ch,
                    position: pos,
                });
            }
        }

        let first_char = canonical.chars().next().unwrap();
        if !Self::is_valid_start_end_char(first_char) {
            return Err(UserNameError::InvalidStart { char: first_char });
        }

        let last_char = canonical.chars().next_back().unwrap();
        if !Self::is_valid_start_end_char(last_char) {
            return Err(UserNameError::InvalidEnd { char: last_char });
        }

        if canonical.contains("..") {
            return Err(UserNameError::ConsecutiveDots);
        }

        if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(UserNameError::NoAlphanumeric);
        }

        if RESERVED_WORDS.iter().any(|&w| w == canonical) {
            return Err(UserNameError::Reserved {
                word: canonical.to_string(),
            });
        }

        Ok(())
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }

    #[inline]
    fn is_valid_start_end_char(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
    }
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_and_lowercase() {
            let name = UserName::new("  AlIcE_123  ").unwrap();
            assert_eq!(name.canonical(), "alice_123");
            assert_eq!(name.original(), "AlIcE_123");
        }

        #[test]
        fn test_nfkc_normalization() {
            // Full-width characters become ASCII after NFKC
            let name = UserName::new("Ａlice").unwrap();
            assert_eq!(name.as_str(), "alice");
        }
    }

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert!(matches!(UserName::new(""), Err(UserNameError::Empty)));
            assert!(matches!(UserName::new("   "), Err(UserNameError::Empty)));
        }

        #[test]
        fn test_too_short() {
            assert!(matches!(
                UserName::new("ab"),
                Err(UserNameError::TooShort { length: 2, min: 3 })
            ));
        }

        #[test]
        fn test_bounds() {
            assert!(UserName::new("abc").is_ok());
            assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
            assert!(matches!(
                UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
                Err(UserNameError::TooLong { .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_names() {
            assert!(UserName::new("alice123").is_ok());
            assert!(UserName::new("alice_bob").is_ok());
            assert!(UserName::new("alice.bob").is_ok());
            assert!(UserName::new("alice-bob").is_ok());
        }

        #[test]
        fn test_invalid_special_char() {
            assert!(matches!(
                UserName::new("alice@bob"),
                Err(UserNameError::InvalidCharacter { char: '@', .. })
            ));
        }

        #[test]
        fn test_invalid_unicode() {
            assert!(matches!(
                UserName::new("日本語"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_whitespace_in_middle_fails() {
            assert!(matches!(
                UserName::new("alice bob"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }
    }

    mod position_validation {
        use super::*;

        #[test]
        fn test_start_rules() {
            assert!(UserName::new("_alice").is_ok());
            assert!(matches!(
                UserName::new(".alice"),
                Err(UserNameError::InvalidStart { char: '.' })
            ));
            assert!(matches!(
                UserName::new("-alice"),
                Err(UserNameError::InvalidStart { char: '-' })
            ));
        }

        #[test]
        fn test_end_rules() {
            assert!(UserName::new("alice_").is_ok());
            assert!(matches!(
                UserName::new("alice."),
                Err(UserNameError::InvalidEnd { char: '.' })
            ));
            assert!(matches!(
                UserName::new("alice-"),
                Err(UserNameError::InvalidEnd { char: '-' })
            ));
        }
    }

    mod pattern_validation {
        use super::*;

        #[test]
        fn test_consecutive_dots_fails() {
            assert!(matches!(
                UserName::new("alice..bob"),
                Err(UserNameError::ConsecutiveDots)
            ));
            assert!(UserName::new("alice.bob.charlie").is_ok());
        }

        #[test]
        fn test_symbols_only_fails() {
            assert!(matches!(
                UserName::new("___"),
                Err(UserNameError::NoAlphanumeric)
            ));
        }
    }

    mod reserved_words {
        use super::*;

        #[test]
        fn test_reserved() {
            assert!(matches!(
                UserName::new("admin"),
                Err(UserNameError::Reserved { word }) if word == "admin"
            ));
            assert!(matches!(
                UserName::new("ADMIN"),
                Err(UserNameError::Reserved { .. })
            ));
            assert!(matches!(
                UserName::new("rides"),
                Err(UserNameError::Reserved { .. })
            ));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_roundtrip() {
            let name = UserName::new("alice").unwrap();
            let json = serde_json::to_string(&name).unwrap();
            assert_eq!(json, "\"alice\"");
            let back: UserName = serde_json::from_str(&json).unwrap();
            assert_eq!(back.as_str(), "alice");
        }

        #[test]
        fn test_deserialize_invalid() {
            let result: Result<UserName, _> = serde_json::from_str("\"ab\"");
            assert!(result.is_err());
        }
    }
}
