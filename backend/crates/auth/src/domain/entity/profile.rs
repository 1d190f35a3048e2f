//! Profile Entity
//!
//! Contact details, social handles and the profile image for a user.
//! Kept separate from the User entity so account data and editable
//! profile data evolve independently.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, mobile_number::MobileNumber, user_id::UserId,
};

/// Profile entity
#[derive(Debug, Clone)]
pub struct Profile {
    /// Reference to User
    pub user_id: UserId,
    /// Email address (unique)
    pub email: Email,
    /// Whether the email has been verified via the emailed link
    pub email_verified: bool,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    /// Mobile number (unique when present)
    pub mobile_number: Option<MobileNumber>,
    pub bio: Option<String>,
    pub facebook_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub twitter_handle: Option<String>,
    pub work_address: Option<String>,
    pub home_address: Option<String>,
    /// Relative media path of the uploaded profile image
    pub profile_image: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile
    pub fn new(
        user_id: UserId,
        email: Email,
        first_name: String,
        last_name: String,
        gender: String,
        mobile_number: Option<MobileNumber>,
        profile_image: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email,
            email_verified: false,
            first_name,
            last_name,
            gender,
            mobile_number,
            bio: None,
            facebook_handle: None,
            instagram_handle: None,
            twitter_handle: None,
            work_address: None,
            home_address: None,
            profile_image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Mark the email as verified
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.updated_at = Utc::now();
    }

    /// Replace the profile image path
    pub fn set_profile_image(&mut self, path: String) {
        self.profile_image = Some(path);
        self.updated_at = Utc::now();
    }

    /// Bump the updated timestamp after field edits
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        Profile::new(
            UserId::new(),
            Email::new("jane@example.com").unwrap(),
            "Jane".to_string(),
            "Doe".to_string(),
            "female".to_string(),
            None,
            None,
        )
    }

    #[test]
    fn test_new_profile_unverified() {
        let p = profile();
        assert!(!p.email_verified);
        assert_eq!(p.full_name(), "Jane Doe");
    }

    #[test]
    fn test_mark_email_verified() {
        let mut p = profile();
        p.mark_email_verified();
        assert!(p.email_verified);
    }

    #[test]
    fn test_set_profile_image() {
        let mut p = profile();
        p.set_profile_image("abc123.png".to_string());
        assert_eq!(p.profile_image.as_deref(), Some("abc123.png"));
    }
}
