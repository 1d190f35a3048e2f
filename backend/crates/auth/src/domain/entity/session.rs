//! Session Entity
//!
//! Represents an authenticated user session.
//! Stored in database with cookie-based token reference.

use chrono::{DateTime, Duration, Utc};
use kernel::role::UserRole;
use uuid::Uuid;

use crate::domain::value_object::{public_id::PublicId, user_id::UserId};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    /// Reference to User
    pub user_id: UserId,
    /// Public ID for API responses
    pub public_id: PublicId,
    /// User role at session creation
    pub user_role: UserRole,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Whether "Remember Me" was checked
    pub remember_me: bool,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (optional, for logging)
    pub client_ip: Option<String>,
    /// User agent string (for session management display)
    pub user_agent: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last activity timestamp
    pub last_activity_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        public_id: PublicId,
        user_role: UserRole,
        remember_me: bool,
        fingerprint_hash: Vec<u8>,
        client_ip: Option<String>,
        user_agent: Option<String>,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            public_id,
            user_role,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            client_fingerprint_hash: fingerprint_hash,
            client_ip,
            user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    /// Get remaining time until expiration
    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Extend session if "Remember Me" is enabled
    ///
    /// The extension policy is intentionally simple:
    /// - only applies to remember_me sessions
    /// - extend to (now + ttl_long) when remaining time falls below half of ttl_long
    pub fn extend_if_needed(&mut self, ttl_long: Duration) {
        if !self.remember_me {
            return;
        }

        let now = Utc::now();
        let new_expires = (now + ttl_long).timestamp_millis();

        if self.expires_at_ms < (now + (ttl_long / 2)).timestamp_millis() {
            self.expires_at_ms = new_expires;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(remember_me: bool, ttl: Duration) -> Session {
        Session::new(
            UserId::new(),
            PublicId::new(),
            UserRole::Passenger,
            remember_me,
            vec![0u8; 32],
            Some("127.0.0.1".to_string()),
            Some("TestAgent/1.0".to_string()),
            ttl,
        )
    }

    #[test]
    fn test_fresh_session_not_expired() {
        let s = session(false, Duration::hours(12));
        assert!(!s.is_expired());
        assert!(s.remaining_ms() > 0);
    }

    #[test]
    fn test_expired_session() {
        let mut s = session(false, Duration::hours(12));
        s.expires_at_ms = Utc::now().timestamp_millis() - 1000;
        assert!(s.is_expired());
        assert_eq!(s.remaining_ms(), 0);
    }

    #[test]
    fn test_extend_only_remember_me() {
        let ttl = Duration::days(7);
        let mut s = session(false, Duration::hours(1));
        let before = s.expires_at_ms;
        s.extend_if_needed(ttl);
        assert_eq!(s.expires_at_ms, before);
    }

    #[test]
    fn test_extend_when_below_half() {
        let ttl = Duration::days(7);
        let mut s = session(true, Duration::days(2));
        let before = s.expires_at_ms;
        s.extend_if_needed(ttl);
        // 2 days remaining < 3.5 days, so the session is extended
        assert!(s.expires_at_ms > before);
    }

    #[test]
    fn test_no_extend_when_plenty_remains() {
        let ttl = Duration::days(7);
        let mut s = session(true, Duration::days(6));
        let before = s.expires_at_ms;
        s.extend_if_needed(ttl);
        assert_eq!(s.expires_at_ms, before);
    }
}
