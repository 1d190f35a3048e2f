//! Profile Use Cases
//!
//! Read and partial update of the authenticated user's profile.

use std::sync::Arc;

use crate::domain::entity::{profile::Profile, user::User};
use crate::domain::repository::{ProfileRepository, UserRepository};
use crate::domain::value_object::{mobile_number::MobileNumber, user_id::UserId};
use crate::error::{AuthError, AuthResult};
use crate::infra::media::{ImageUpload, MediaStore};

/// Fields a profile update may carry. Absent fields are left unchanged.
#[derive(Debug, Default)]
pub struct ProfileEdit {
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

/// Get profile use case
pub struct GetProfileUseCase<R: UserRepository + ProfileRepository> {
    repo: Arc<R>,
}

impl<R: UserRepository + ProfileRepository> GetProfileUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> AuthResult<(User, Profile)> {
        let user = self
            .repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let profile = self
            .repo
            .find_profile(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok((user, profile))
    }
}

/// Update profile use case
pub struct UpdateProfileUseCase<R: UserRepository + ProfileRepository> {
    repo: Arc<R>,
    media: Arc<MediaStore>,
}

impl<R: UserRepository + ProfileRepository> UpdateProfileUseCase<R> {
    pub fn new(repo: Arc<R>, media: Arc<MediaStore>) -> Self {
        Self { repo, media }
    }

    pub async fn execute(
        &self,
        user_id: &UserId,
        edit: ProfileEdit,
        image: Option<ImageUpload>,
    ) -> AuthResult<(User, Profile)> {
        let user = self
            .repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        let mut profile = self
            .repo
            .find_profile(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if let Some(raw) = edit.mobile_number {
            let mobile = MobileNumber::new(&raw)
                .map_err(|e| AuthError::Validation(e.to_string()))?;
            if self.repo.mobile_number_taken(&mobile, user_id).await? {
                return Err(AuthError::MobileNumberTaken);
            }
            profile.mobile_number = Some(mobile);
        }

        if let Some(v) = edit.first_name {
            profile.first_name = v;
        }
        if let Some(v) = edit.last_name {
            profile.last_name = v;
        }
        if let Some(v) = edit.gender {
            profile.gender = v;
        }
        if let Some(v) = edit.bio {
            profile.bio = Some(v);
        }
        if let Some(v) = edit.facebook_handle {
            profile.facebook_handle = Some(v);
        }
        if let Some(v) = edit.instagram_handle {
            profile.instagram_handle = Some(v);
        }
        if let Some(v) = edit.twitter_handle {
            profile.twitter_handle = Some(v);
        }
        if let Some(v) = edit.work_address {
            profile.work_address = Some(v);
        }
        if let Some(v) = edit.home_address {
            profile.home_address = Some(v);
        }

        if let Some(upload) = image {
            let stored = self.media.save(upload).await?;
            profile.set_profile_image(stored);
        }

        profile.touch();
        self.repo.update_profile(&profile).await?;

        tracing::debug!(public_id = %user.public_id, "Profile updated");
        Ok((user, profile))
    }
}
