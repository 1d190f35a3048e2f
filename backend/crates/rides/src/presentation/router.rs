//! Rides Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::domain::repository::RideRepository;
use crate::infra::postgres::PgRideRepository;
use crate::presentation::handlers::{self, RidesAppState};

/// Create the rides router with PostgreSQL repository.
///
/// The caller is expected to layer the session middleware on top; every
/// route here assumes an authenticated `CurrentUser`.
pub fn rides_router(repo: PgRideRepository) -> Router {
    rides_router_generic(repo)
}

/// Create a generic rides router for any repository implementation
pub fn rides_router_generic<R>(repo: R) -> Router
where
    R: RideRepository + Clone + Send + Sync + 'static,
{
    let state = RidesAppState {
        repo: Arc::new(repo),
    };

    Router::new()
        .route(
            "/",
            get(handlers::search_rides::<R>).post(handlers::share_ride::<R>),
        )
        .route("/booked", get(handlers::booked_rides::<R>))
        .route("/{ride_id}/book", post(handlers::book_ride::<R>))
        .with_state(state)
}
