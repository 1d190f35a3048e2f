//! User Entity
//!
//! Core user account entity. Contact and profile details live in the
//! Profile entity, sensitive auth data in Credentials.

use chrono::{DateTime, Utc};
use kernel::role::UserRole;

use crate::domain::value_object::{
    public_id::PublicId, user_id::UserId, user_name::UserName,
};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Public-facing nanoid identifier (URL-safe)
    pub public_id: PublicId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// Role (Passenger or Driver)
    pub user_role: UserRole,
    /// Whether the account is active
    pub is_active: bool,
    /// Last successful login time
    pub last_login_at: Option<DateTime<Utc>>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(user_name: UserName, user_role: UserRole) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            public_id: PublicId::new(),
            user_name,
            user_role,
            is_active: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Deactivate the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let name = UserName::new("alice").unwrap();
        let user = User::new(name, UserRole::default());
        assert!(user.is_active);
        assert!(user.can_login());
        assert!(user.last_login_at.is_none());
        assert_eq!(user.user_role, UserRole::Passenger);
    }

    #[test]
    fn test_record_login() {
        let name = UserName::new("alice").unwrap();
        let mut user = User::new(name, UserRole::Driver);
        user.record_login();
        assert!(user.last_login_at.is_some());
    }

    #[test]
    fn test_deactivate() {
        let name = UserName::new("alice").unwrap();
        let mut user = User::new(name, UserRole::Passenger);
        user.deactivate();
        assert!(!user.can_login());
    }
}
