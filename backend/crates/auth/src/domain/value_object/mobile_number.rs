//! Mobile Number Value Object
//!
//! Stores phone numbers in a normalized E.164-like form: an optional
//! leading `+` followed by 10 to 15 digits. Spaces, dashes and
//! parentheses in user input are stripped before validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum digits in a mobile number
pub const MOBILE_MIN_DIGITS: usize = 10;

/// Maximum digits in a mobile number (E.164 limit)
pub const MOBILE_MAX_DIGITS: usize = 15;

/// Error returned when mobile number validation fails
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MobileNumberError {
    #[error("Mobile number cannot be empty")]
    Empty,

    #[error("Mobile number must have between {MOBILE_MIN_DIGITS} and {MOBILE_MAX_DIGITS} digits (got {0})")]
    WrongLength(usize),

    #[error("Mobile number contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// Validated, normalized mobile number
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Create a new MobileNumber from raw input
    pub fn new(input: impl AsRef<str>) -> Result<Self, MobileNumberError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(MobileNumberError::Empty);
        }

        let mut normalized = String::with_capacity(trimmed.len());
        for (pos, ch) in trimmed.chars().enumerate() {
            match ch {
                '+' if pos == 0 => normalized.push('+'),
                '0'..='9' => normalized.push(ch),
                // Common formatting characters are dropped
                ' ' | '-' | '(' | ')' => {}
                other => return Err(MobileNumberError::InvalidCharacter(other)),
            }
        }

        let digits = normalized.chars().filter(|c| c.is_ascii_digit()).count();
        if !(MOBILE_MIN_DIGITS..=MOBILE_MAX_DIGITS).contains(&digits) {
            return Err(MobileNumberError::WrongLength(digits));
        }

        Ok(Self(normalized))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the normalized number
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to string for database storage
    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = MobileNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_plain_digits() {
        let n = MobileNumber::new("08012345678").unwrap();
        assert_eq!(n.as_str(), "08012345678");
    }

    #[test]
    fn test_valid_international() {
        let n = MobileNumber::new("+234 801 234 5678").unwrap();
        assert_eq!(n.as_str(), "+2348012345678");
    }

    #[test]
    fn test_formatting_stripped() {
        let n = MobileNumber::new("(080) 1234-5678").unwrap();
        assert_eq!(n.as_str(), "08012345678");
    }

    #[test]
    fn test_empty_fails() {
        assert_eq!(MobileNumber::new("  "), Err(MobileNumberError::Empty));
    }

    #[test]
    fn test_too_short() {
        assert!(matches!(
            MobileNumber::new("12345"),
            Err(MobileNumberError::WrongLength(5))
        ));
    }

    #[test]
    fn test_too_long() {
        assert!(matches!(
            MobileNumber::new("1234567890123456"),
            Err(MobileNumberError::WrongLength(16))
        ));
    }

    #[test]
    fn test_plus_only_at_start() {
        assert!(matches!(
            MobileNumber::new("080+12345678"),
            Err(MobileNumberError::InvalidCharacter('+'))
        ));
    }

    #[test]
    fn test_letters_rejected() {
        assert!(matches!(
            MobileNumber::new("0801234abcd"),
            Err(MobileNumberError::InvalidCharacter('a'))
        ));
    }
}
