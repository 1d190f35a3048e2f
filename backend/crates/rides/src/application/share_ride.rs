//! Share Ride Use Case
//!
//! A driver publishes a ride offer.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::entity::Ride;
use crate::domain::repository::{DriverSummary, RideRepository};
use crate::domain::value_object::{PricePerSeat, SeatCount, VehiclePlate};
use crate::error::{RideError, RideResult};

/// Validated fields for a new ride offer
pub struct ShareRideInput {
    pub vehicle_type: String,
    pub vehicle_model: Option<String>,
    pub vehicle_plate: String,
    pub available_seats: i32,
    pub departure_location: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub price_per_seat: f64,
}

pub struct ShareRideUseCase<R: RideRepository> {
    repo: Arc<R>,
}

impl<R: RideRepository> ShareRideUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        driver_id: UserId,
        input: ShareRideInput,
    ) -> RideResult<(Ride, DriverSummary)> {
        let plate = VehiclePlate::new(&input.vehicle_plate)
            .map_err(|e| RideError::Validation(e.to_string()))?;
        let seats = SeatCount::new(input.available_seats)
            .map_err(|e| RideError::Validation(e.to_string()))?;
        let price = PricePerSeat::new(input.price_per_seat)
            .map_err(|e| RideError::Validation(e.to_string()))?;

        for (field, value) in [
            ("vehicle_type", &input.vehicle_type),
            ("departure_location", &input.departure_location),
            ("destination", &input.destination),
        ] {
            if value.trim().is_empty() {
                return Err(RideError::Validation(format!("Missing field '{field}'")));
            }
        }

        // Pre-check for a friendlier message; the unique index backstops races
        if self.repo.plate_exists(&plate).await? {
            return Err(RideError::PlateTaken);
        }

        let ride = Ride::new(
            driver_id,
            input.vehicle_type,
            input.vehicle_model,
            plate,
            seats,
            input.departure_location,
            input.destination,
            input.departure_time,
            price,
        );

        self.repo.create_ride(&ride).await?;

        tracing::info!(
            ride_id = %ride.ride_id,
            destination = %ride.destination,
            seats = ride.available_seats,
            "Ride shared"
        );

        let driver = self
            .repo
            .find_ride_with_driver(&ride.ride_id)
            .await?
            .map(|(_, driver)| driver)
            .ok_or(RideError::RideNotFound)?;

        Ok((ride, driver))
    }
}
