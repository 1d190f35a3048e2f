//! API DTOs (Data Transfer Objects)

use kernel::role::UserRole;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{profile::Profile, user::User};

// ============================================================================
// Sign In
// ============================================================================

/// Sign in request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// User name or email
    pub identifier: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

/// Sign in response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub public_id: String,
    pub user_name: String,
    pub role: UserRole,
}

// ============================================================================
// Session Status
// ============================================================================

/// Session status response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at_ms: Option<i64>,
}

// ============================================================================
// Email Verification / Password Reset
// ============================================================================

/// Request carrying only an email address
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub email: String,
}

/// Password reset confirmation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmResetRequest {
    pub new_password: String,
    pub confirm_password: String,
}

/// Generic acknowledgement body
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub public_id: String,
    pub user_name: String,
    pub role: UserRole,
    pub email: String,
    pub email_verified: bool,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub mobile_number: Option<String>,
    pub bio: Option<String>,
    pub facebook_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub twitter_handle: Option<String>,
    pub work_address: Option<String>,
    pub home_address: Option<String>,
    /// Public URL of the profile image, if any
    pub profile_image: Option<String>,
    pub date_joined: chrono::DateTime<chrono::Utc>,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl ProfileResponse {
    pub fn from_parts(user: &User, profile: &Profile) -> Self {
        Self {
            public_id: user.public_id.to_string(),
            user_name: user.user_name.original().to_string(),
            role: user.user_role,
            email: profile.email.as_str().to_string(),
            email_verified: profile.email_verified,
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            gender: profile.gender.clone(),
            mobile_number: profile.mobile_number.as_ref().map(|m| m.as_str().to_string()),
            bio: profile.bio.clone(),
            facebook_handle: profile.facebook_handle.clone(),
            instagram_handle: profile.instagram_handle.clone(),
            twitter_handle: profile.twitter_handle.clone(),
            work_address: profile.work_address.clone(),
            home_address: profile.home_address.clone(),
            profile_image: profile
                .profile_image
                .as_ref()
                .map(|f| format!("/media/{f}")),
            date_joined: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

/// JSON payload carried in the `profile_data` part of a profile update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileEditData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub mobile_number: Option<String>,
    pub bio: Option<String>,
    pub facebook_handle: Option<String>,
    pub instagram_handle: Option<String>,
    pub twitter_handle: Option<String>,
    pub work_address: Option<String>,
    pub home_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_request_remember_me_defaults_to_false() {
        let req: SignInRequest =
            serde_json::from_str(r#"{"identifier":"alice","password":"pw"}"#).unwrap();
        assert!(!req.remember_me);
    }

    #[test]
    fn test_session_status_omits_absent_fields() {
        let json = serde_json::to_string(&SessionStatusResponse {
            authenticated: false,
            public_id: None,
            role: None,
            expires_at_ms: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"authenticated":false}"#);
    }

    #[test]
    fn test_profile_edit_data_partial() {
        let edit: ProfileEditData =
            serde_json::from_str(r#"{"firstName":"Ada","bio":"hi"}"#).unwrap();
        assert_eq!(edit.first_name.as_deref(), Some("Ada"));
        assert!(edit.last_name.is_none());
    }
}
