//! Book Ride Use Case
//!
//! A passenger claims one seat on a ride.

use std::sync::Arc;

use kernel::id::{RideId, UserId};

use crate::domain::entity::{Booking, Ride};
use crate::domain::repository::{DriverSummary, RideRepository};
use crate::error::{RideError, RideResult};

pub struct BookRideUseCase<R: RideRepository> {
    repo: Arc<R>,
}

impl<R: RideRepository> BookRideUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        ride_id: &RideId,
        passenger_id: UserId,
    ) -> RideResult<(Ride, DriverSummary)> {
        let (mut ride, driver) = self
            .repo
            .find_ride_with_driver(ride_id)
            .await?
            .ok_or(RideError::RideNotFound)?;

        if ride.driver_id == passenger_id {
            return Err(RideError::CannotBookOwnRide);
        }
        if !ride.can_be_booked_by(&passenger_id) {
            return Err(RideError::NoSeatsLeft);
        }
        if self.repo.booking_exists(ride_id, &passenger_id).await? {
            return Err(RideError::AlreadyBooked);
        }

        let booking = Booking::new(*ride_id, passenger_id, ride.price_per_seat);
        self.repo.book_seat(&booking).await?;

        ride.take_seat();

        tracing::info!(
            ride_id = %ride.ride_id,
            booking_id = %booking.booking_id,
            "Ride booked"
        );

        Ok((ride, driver))
    }
}
