//! Chat Routers

use axum::{Router, routing::get, routing::post};
use std::sync::Arc;

use crate::domain::repository::ChatRepository;
use crate::infra::postgres::PgChatRepository;
use crate::presentation::handlers::{self, ChatAppState};

/// Routes nested under `/api/v1/messages`.
///
/// The caller layers the session middleware on top.
pub fn messages_router(repo: PgChatRepository) -> Router {
    messages_router_generic(repo)
}

/// Route nested under `/api/v1/rides`, serving the per-ride thread
pub fn ride_thread_router(repo: PgChatRepository) -> Router {
    ride_thread_router_generic(repo)
}

pub fn messages_router_generic<R>(repo: R) -> Router
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let state = ChatAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/", post(handlers::send_message::<R>))
        .route("/threads", get(handlers::thread_list::<R>))
        .with_state(state)
}

pub fn ride_thread_router_generic<R>(repo: R) -> Router
where
    R: ChatRepository + Clone + Send + Sync + 'static,
{
    let state = ChatAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route("/{ride_id}/messages", get(handlers::ride_thread::<R>))
        .with_state(state)
}
