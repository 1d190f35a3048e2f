//! HTTP Handlers

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use kernel::CurrentUser;
use platform::client::{extract_client_ip, extract_fingerprint};

use crate::application::config::AuthConfig;
use platform::cookie::CookieConfig;
use crate::application::{
    CheckSessionUseCase, GetProfileUseCase, ProfileEdit, ResetPasswordUseCase, SignInInput,
    SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, UpdateProfileUseCase,
    VerifyEmailUseCase,
};
use crate::domain::repository::{
    CredentialsRepository, ProfileRepository, SessionRepository, UserRepository,
};
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};
use crate::infra::mailer::Mailer;
use crate::infra::media::{ImageUpload, MediaStore};
use crate::presentation::dto::{
    ConfirmResetRequest, EmailRequest, MessageResponse, ProfileEditData, ProfileResponse,
    SessionStatusResponse, SignInRequest, SignInResponse,
};

/// Repository bound shared by every auth handler
pub trait AuthRepo:
    UserRepository
    + CredentialsRepository
    + ProfileRepository
    + SessionRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthRepo for T where
    T: UserRepository
        + CredentialsRepository
        + ProfileRepository
        + SessionRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for auth handlers
pub struct AuthAppState<R: AuthRepo, M: Mailer> {
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub media: Arc<MediaStore>,
    pub config: Arc<AuthConfig>,
}

impl<R: AuthRepo, M: Mailer> Clone for AuthAppState<R, M> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            mailer: Arc::clone(&self.mailer),
            media: Arc::clone(&self.media),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
///
/// Multipart form: text fields plus an optional `profile_image` file.
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    mut multipart: Multipart,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let mut input = SignUpInput {
        user_name: String::new(),
        email: String::new(),
        password: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        gender: String::new(),
        mobile_number: String::new(),
        role: None,
        profile_image: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuthError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "profile_image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AuthError::Validation(format!("Failed to read image: {e}")))?;
                if !bytes.is_empty() {
                    input.profile_image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AuthError::Validation(format!("Invalid field '{name}': {e}")))?;
                match name.as_str() {
                    "username" => input.user_name = value,
                    "email" => input.email = value,
                    "password" => input.password = value,
                    "first_name" => input.first_name = value,
                    "last_name" => input.last_name = value,
                    "gender" => input.gender = value,
                    "mobile_number" => input.mobile_number = value,
                    "role" => input.role = Some(value),
                    // Unknown fields are ignored so clients can evolve
                    _ => {}
                }
            }
        }
    }

    for (field, value) in [
        ("username", &input.user_name),
        ("email", &input.email),
        ("password", &input.password),
        ("first_name", &input.first_name),
        ("last_name", &input.last_name),
        ("gender", &input.gender),
        ("mobile_number", &input.mobile_number),
    ] {
        if value.is_empty() {
            return Err(AuthError::Validation(format!("Missing field '{field}'")));
        }
    }

    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.media.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::from_parts(&output.user, &output.profile)),
    ))
}

// ============================================================================
// Sign In / Sign Out
// ============================================================================

/// POST /api/v1/auth/login
pub async fn sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let use_case = SignInUseCase::new(state.repo.clone(), state.config.clone());

    let input = SignInInput {
        identifier: req.identifier,
        password: req.password,
        remember_me: req.remember_me,
        fingerprint_hash: fingerprint.hash.to_vec(),
        client_ip: fingerprint.ip_string(),
        user_agent: fingerprint.user_agent,
    };

    let output = use_case.execute(input).await?;

    // Max-Age must match the session TTL picked by remember_me
    let cookie = build_session_cookie(&state.config, &output.session_token, output.remember_me);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(SignInResponse {
            public_id: output.public_id,
            user_name: output.user_name,
            role: output.role,
        }),
    ))
}

/// POST /api/v1/auth/logout
pub async fn sign_out<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    if let Some(token) = extract_session_token(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = build_clear_cookie(&state.config);

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/v1/auth/status
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip).ok();

    let token = extract_session_token(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    // Status never fails; anything short of a valid session reads as signed out
    let status = match (token, fingerprint) {
        (Some(token), Some(fp)) => use_case.execute(&token, &fp.hash).await.ok(),
        _ => None,
    };

    match status {
        Some(info) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            public_id: Some(info.public_id),
            role: Some(info.role),
            expires_at_ms: Some(info.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            public_id: None,
            role: None,
            expires_at_ms: None,
        })),
    }
}

// ============================================================================
// Email Verification
// ============================================================================

/// GET /api/v1/auth/verify/{token}
pub async fn verify_email<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    use_case.confirm(&token).await?;

    Ok(Json(MessageResponse::new("Email verified successfully")))
}

/// POST /api/v1/auth/verify/request
pub async fn request_verification<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = VerifyEmailUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    use_case.request(&req.email).await?;

    Ok(Json(MessageResponse::new("Verification email sent")))
}

// ============================================================================
// Password Reset
// ============================================================================

/// POST /api/v1/auth/reset-password/request
pub async fn request_password_reset<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<EmailRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    use_case.request(&req.email).await?;

    // Same response whether or not the address exists
    Ok(Json(MessageResponse::new(
        "If the address is registered, a reset link has been sent",
    )))
}

/// POST /api/v1/auth/reset-password/{token}
pub async fn confirm_password_reset<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Path(token): Path<String>,
    Json(req): Json<ConfirmResetRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = ResetPasswordUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );
    use_case
        .confirm(&token, req.new_password, req.confirm_password)
        .await?;

    Ok(Json(MessageResponse::new("Password has been reset")))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/v1/users/me
pub async fn get_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    current_user: CurrentUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let user_id = UserId::from_uuid(current_user.user_id);
    let (user, profile) = use_case.execute(&user_id).await?;

    Ok(Json(ProfileResponse::from_parts(&user, &profile)))
}

/// PUT /api/v1/users/me
///
/// Multipart form: a `profile_data` JSON part and an optional `image` file.
pub async fn update_profile<R, M>(
    State(state): State<AuthAppState<R, M>>,
    current_user: CurrentUser,
    mut multipart: Multipart,
) -> AuthResult<Json<ProfileResponse>>
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let mut edit_data = ProfileEditData::default();
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuthError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "profile_data" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AuthError::Validation(format!("Invalid profile data: {e}")))?;
                edit_data = serde_json::from_str(&raw)
                    .map_err(|e| AuthError::Validation(format!("Invalid profile data: {e}")))?;
            }
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AuthError::Validation(format!("Failed to read image: {e}")))?;
                if !bytes.is_empty() {
                    image = Some(ImageUpload {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            _ => {}
        }
    }

    let edit = ProfileEdit {
        first_name: edit_data.first_name,
        last_name: edit_data.last_name,
        gender: edit_data.gender,
        mobile_number: edit_data.mobile_number,
        bio: edit_data.bio,
        facebook_handle: edit_data.facebook_handle,
        instagram_handle: edit_data.instagram_handle,
        twitter_handle: edit_data.twitter_handle,
        work_address: edit_data.work_address,
        home_address: edit_data.home_address,
    };

    let use_case = UpdateProfileUseCase::new(state.repo.clone(), state.media.clone());
    let user_id = UserId::from_uuid(current_user.user_id);
    let (user, profile) = use_case.execute(&user_id, edit, image).await?;

    Ok(Json(ProfileResponse::from_parts(&user, &profile)))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Session token from the cookie, falling back to a bearer header
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = platform::cookie::extract_cookie(headers, cookie_name) {
        return Some(token);
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

fn cookie_policy(config: &AuthConfig, max_age_secs: Option<i64>) -> CookieConfig {
    CookieConfig {
        name: config.session_cookie_name.clone(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs,
    }
}

pub fn build_session_cookie(config: &AuthConfig, token: &str, remember_me: bool) -> String {
    let max_age = if remember_me {
        config.session_ttl_long.as_secs()
    } else {
        config.session_ttl_short.as_secs()
    };

    cookie_policy(config, Some(max_age as i64)).build_set_cookie(token)
}

pub fn build_clear_cookie(config: &AuthConfig) -> String {
    cookie_policy(config, None).build_delete_cookie()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::default()
    }

    #[test]
    fn test_session_cookie_max_age_follows_remember_me() {
        let cfg = config();
        let short = build_session_cookie(&cfg, "tok", false);
        let long = build_session_cookie(&cfg, "tok", true);
        assert!(short.contains(&format!("Max-Age={}", cfg.session_ttl_short.as_secs())));
        assert!(long.contains(&format!("Max-Age={}", cfg.session_ttl_long.as_secs())));
    }

    #[test]
    fn test_clear_cookie_expires_immediately() {
        let cookie = build_clear_cookie(&config());
        assert!(cookie.starts_with("session="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_bearer_token_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc.def".parse().unwrap());
        assert_eq!(
            extract_session_token(&headers, "session"),
            Some("abc.def".to_string())
        );

        headers.insert(header::COOKIE, "session=xyz".parse().unwrap());
        assert_eq!(
            extract_session_token(&headers, "session"),
            Some("xyz".to_string())
        );
    }
}
