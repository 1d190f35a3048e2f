//! Booked Rides Use Case
//!
//! Rides the current passenger has booked, with their passenger lists.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{BookedRide, RideRepository};
use crate::error::RideResult;

pub struct BookedRidesUseCase<R: RideRepository> {
    repo: Arc<R>,
}

impl<R: RideRepository> BookedRidesUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, passenger_id: &UserId) -> RideResult<Vec<BookedRide>> {
        self.repo.booked_rides(passenger_id).await
    }
}
