//! Auth Routers

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::infra::mailer::{LogMailer, Mailer};
use crate::infra::media::MediaStore;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthRepo};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth_session};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, media: MediaStore, config: AuthConfig) -> Router {
    auth_router_generic(repo, LogMailer, media, config)
}

/// Create the authenticated users router with PostgreSQL repository
pub fn users_router(repo: PgAuthRepository, media: MediaStore, config: AuthConfig) -> Router {
    users_router_generic(repo, LogMailer, media, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, media: MediaStore, config: AuthConfig) -> Router
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        media: Arc::new(media),
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, M>))
        .route("/login", post(handlers::sign_in::<R, M>))
        .route("/logout", post(handlers::sign_out::<R, M>))
        .route("/status", get(handlers::session_status::<R, M>))
        .route("/verify/request", post(handlers::request_verification::<R, M>))
        .route("/verify/{token}", get(handlers::verify_email::<R, M>))
        .route(
            "/reset-password/request",
            post(handlers::request_password_reset::<R, M>),
        )
        .route(
            "/reset-password/{token}",
            post(handlers::confirm_password_reset::<R, M>),
        )
        .with_state(state)
}

/// Create a generic users router, gated behind the session middleware
pub fn users_router_generic<R, M>(
    repo: R,
    mailer: M,
    media: MediaStore,
    config: AuthConfig,
) -> Router
where
    R: AuthRepo,
    M: Mailer + Send + Sync + 'static,
{
    let repo = Arc::new(repo);
    let config = Arc::new(config);

    let state = AuthAppState {
        repo: Arc::clone(&repo),
        mailer: Arc::new(mailer),
        media: Arc::new(media),
        config: Arc::clone(&config),
    };
    let mw_state = AuthMiddlewareState { repo, config };

    Router::new()
        .route(
            "/me",
            get(handlers::get_profile::<R, M>).put(handlers::update_profile::<R, M>),
        )
        .layer(from_fn_with_state(mw_state, require_auth_session::<R>))
        .with_state(state)
}
