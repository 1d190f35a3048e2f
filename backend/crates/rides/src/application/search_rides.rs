//! Search Rides Use Case
//!
//! Passengers look up open rides by destination.

use std::sync::Arc;

use crate::domain::entity::Ride;
use crate::domain::repository::{DriverSummary, RideRepository};
use crate::error::{RideError, RideResult};

pub struct SearchRidesUseCase<R: RideRepository> {
    repo: Arc<R>,
}

impl<R: RideRepository> SearchRidesUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        destination: Option<&str>,
    ) -> RideResult<Vec<(Ride, DriverSummary)>> {
        let destination = destination.map(str::trim).unwrap_or_default();
        if destination.is_empty() {
            return Err(RideError::DestinationRequired);
        }

        self.repo.search_available(destination).await
    }
}
