//! Auth Middleware
//!
//! Resolves the session on protected routes and exposes the authenticated
//! identity to downstream handlers through request extensions.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::client::{extract_client_ip, extract_fingerprint};
use std::sync::Arc;

use kernel::CurrentUser;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;
use crate::presentation::handlers::extract_session_token;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// Middleware that requires a valid session.
///
/// On success the request carries a `CurrentUser` extension; rides and
/// chat handlers extract it without ever seeing the session machinery.
pub async fn require_auth_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: SessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let client_ip = req
        .extensions()
        .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        .map(|info| info.0.ip());

    let client_ip = extract_client_ip(headers, client_ip);

    let fingerprint = match extract_fingerprint(headers, client_ip) {
        Ok(fp) => fp,
        Err(e) => return AuthError::from(e).into_response(),
    };

    let Some(token) = extract_session_token(headers, &state.config.session_cookie_name) else {
        return AuthError::SessionInvalid.into_response();
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session = match use_case.get_session(&token, &fingerprint.hash).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    req.extensions_mut().insert(CurrentUser {
        user_id: *session.user_id.as_uuid(),
        public_id: session.public_id.to_string(),
        role: session.user_role,
    });

    next.run(req).await
}
