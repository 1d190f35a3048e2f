//! PublicId Value Object
//!
//! URL-safe identifier exposed in API responses instead of the internal
//! UUID, so enumeration of user rows stays impossible from outside.

use kernel::error::app_error::{AppError, AppResult};
use nid::Nanoid;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicId(Nanoid);

impl PublicId {
    pub fn new() -> Self {
        Self(Nanoid::new())
    }

    /// Wrap an id read back from storage
    pub fn from_nanoid(id: Nanoid) -> Self {
        Self(id)
    }

    pub fn parse_str(s: &str) -> AppResult<Self> {
        Nanoid::from_str(s)
            .map(PublicId)
            .map_err(|e| AppError::bad_request(format!("Invalid public id: {e}")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Default for PublicId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = PublicId::new();
        let b = PublicId::new();
        assert_eq!(a.as_str().len(), 21);
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_roundtrip() {
        let id = PublicId::new();
        let parsed = PublicId::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_rejects_non_nanoid_input() {
        assert!(PublicId::parse_str("invalid_id!@#").is_err());
    }
}
