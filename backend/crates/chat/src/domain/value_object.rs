//! Chat Value Objects

use serde::{Deserialize, Serialize};

/// Maximum message length in characters
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Message body, non-empty after trimming and at most 2000 characters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageContent(String);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MessageContentError {
    #[error("Message cannot be empty")]
    Empty,
    #[error("Message is too long (max {MAX_MESSAGE_CHARS} characters)")]
    TooLong,
}

impl MessageContent {
    pub fn new(input: &str) -> Result<Self, MessageContentError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MessageContentError::Empty);
        }
        if trimmed.chars().count() > MAX_MESSAGE_CHARS {
            return Err(MessageContentError::TooLong);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Construct from a stored value
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = MessageContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<MessageContent> for String {
    fn from(value: MessageContent) -> Self {
        value.0
    }
}

impl std::fmt::Display for MessageContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_trimmed() {
        let content = MessageContent::new("  hello  ").unwrap();
        assert_eq!(content.as_str(), "hello");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(MessageContent::new(""), Err(MessageContentError::Empty));
        assert_eq!(MessageContent::new("   "), Err(MessageContentError::Empty));
    }

    #[test]
    fn test_length_limit() {
        let at_limit = "x".repeat(MAX_MESSAGE_CHARS);
        assert!(MessageContent::new(&at_limit).is_ok());

        let over = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(MessageContent::new(&over), Err(MessageContentError::TooLong));
    }
}
