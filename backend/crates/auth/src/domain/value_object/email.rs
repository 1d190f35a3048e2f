//! Email Value Object
//!
//! Syntactic validation only; ownership of the address is proven through
//! the verification link flow.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// RFC 5321 path limit
const MAX_TOTAL_LEN: usize = 254;
/// RFC 5321 local-part limit
const MAX_LOCAL_LEN: usize = 64;

/// Lowercased, trimmed email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Validate and normalize an address
    pub fn new(input: impl Into<String>) -> AppResult<Self> {
        let normalized = input.into().trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }
        if normalized.len() > MAX_TOTAL_LEN {
            return Err(AppError::bad_request(format!(
                "Email must be at most {MAX_TOTAL_LEN} characters"
            )));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::bad_request("Invalid email format"));
        };

        let local_ok = !local.is_empty() && local.len() <= MAX_LOCAL_LEN;
        let domain_ok = domain.contains('.')
            && !domain.starts_with(['.', '-'])
            && !domain.ends_with(['.', '-'])
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

        if !local_ok || !domain_ok {
            return Err(AppError::bad_request("Invalid email format"));
        }

        Ok(Self(normalized))
    }

    /// Rehydrate a stored value without re-validating
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_common_shapes() {
        for addr in [
            "rider@example.com",
            "first.last@example.co.uk",
            "driver+pool@example.com",
        ] {
            assert!(Email::new(addr).is_ok(), "{addr} should parse");
        }
    }

    #[test]
    fn test_rejects_malformed_addresses() {
        for addr in [
            "",
            "no-at-sign.example.com",
            "dangling@",
            "@example.com",
            "two@@example.com",
            "bare@domain",
            "dot@.example.com",
        ] {
            assert!(Email::new(addr).is_err(), "{addr} should be rejected");
        }
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        let email = Email::new("  Rider@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "rider@example.com");
    }
}
