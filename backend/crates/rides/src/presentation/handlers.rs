//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use kernel::CurrentUser;
use kernel::id::{RideId, UserId};

use crate::application::{
    BookRideUseCase, BookedRidesUseCase, SearchRidesUseCase, ShareRideInput, ShareRideUseCase,
};
use crate::domain::repository::RideRepository;
use crate::error::{RideError, RideResult};
use crate::presentation::dto::{CreateRideRequest, RideResponse, SearchQuery};

/// Shared state for ride handlers
pub struct RidesAppState<R: RideRepository> {
    pub repo: Arc<R>,
}

impl<R: RideRepository> Clone for RidesAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// POST /api/v1/rides
///
/// Drivers publish a ride offer.
pub async fn share_ride<R>(
    State(state): State<RidesAppState<R>>,
    current_user: CurrentUser,
    Json(req): Json<CreateRideRequest>,
) -> RideResult<impl IntoResponse>
where
    R: RideRepository + Send + Sync + 'static,
{
    if !current_user.role.is_driver() {
        return Err(RideError::DriversOnly);
    }

    let use_case = ShareRideUseCase::new(state.repo.clone());
    let input = ShareRideInput {
        vehicle_type: req.vehicle_type,
        vehicle_model: req.vehicle_model,
        vehicle_plate: req.vehicle_plate,
        available_seats: req.available_seats,
        departure_location: req.departure_location,
        destination: req.destination,
        departure_time: req.departure_time,
        price_per_seat: req.price_per_seat,
    };

    let driver_id = UserId::from_uuid(current_user.user_id);
    let (ride, driver) = use_case.execute(driver_id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RideResponse::from_parts(&ride, &driver)),
    ))
}

/// GET /api/v1/rides?destination=...
///
/// Passengers search open rides by destination.
pub async fn search_rides<R>(
    State(state): State<RidesAppState<R>>,
    current_user: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> RideResult<Json<Vec<RideResponse>>>
where
    R: RideRepository + Send + Sync + 'static,
{
    if !current_user.role.is_passenger() {
        return Err(RideError::PassengersOnly);
    }

    let use_case = SearchRidesUseCase::new(state.repo.clone());
    let rides = use_case.execute(query.destination.as_deref()).await?;

    Ok(Json(
        rides
            .iter()
            .map(|(ride, driver)| RideResponse::from_parts(ride, driver))
            .collect(),
    ))
}

/// POST /api/v1/rides/{ride_id}/book
pub async fn book_ride<R>(
    State(state): State<RidesAppState<R>>,
    current_user: CurrentUser,
    Path(ride_id): Path<Uuid>,
) -> RideResult<impl IntoResponse>
where
    R: RideRepository + Send + Sync + 'static,
{
    if !current_user.role.is_passenger() {
        return Err(RideError::PassengersOnly);
    }

    let use_case = BookRideUseCase::new(state.repo.clone());
    let ride_id = RideId::from_uuid(ride_id);
    let passenger_id = UserId::from_uuid(current_user.user_id);

    let (ride, driver) = use_case.execute(&ride_id, passenger_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(RideResponse::from_parts(&ride, &driver)),
    ))
}

/// GET /api/v1/rides/booked
pub async fn booked_rides<R>(
    State(state): State<RidesAppState<R>>,
    current_user: CurrentUser,
) -> RideResult<Json<Vec<RideResponse>>>
where
    R: RideRepository + Send + Sync + 'static,
{
    if !current_user.role.is_passenger() {
        return Err(RideError::PassengersOnly);
    }

    let use_case = BookedRidesUseCase::new(state.repo.clone());
    let passenger_id = UserId::from_uuid(current_user.user_id);
    let booked = use_case.execute(&passenger_id).await?;

    Ok(Json(booked.iter().map(RideResponse::from_booked).collect()))
}
