//! Ride Repository Trait

use kernel::id::{RideId, UserId};

use crate::domain::entity::{Booking, Ride};
use crate::domain::value_object::VehiclePlate;
use crate::error::RideResult;

/// Driver fields joined onto ride rows for API responses
#[derive(Debug, Clone)]
pub struct DriverSummary {
    pub name: String,
    pub profile_image: Option<String>,
}

/// Passenger fields for the booked-rides listing
#[derive(Debug, Clone)]
pub struct PassengerSummary {
    pub name: String,
    /// Pickup point, taken from the ride's departure location
    pub departure_location: String,
    pub profile_image: Option<String>,
}

/// A booked ride with its driver and co-passengers
#[derive(Debug, Clone)]
pub struct BookedRide {
    pub ride: Ride,
    pub driver: DriverSummary,
    pub passengers: Vec<PassengerSummary>,
}

/// Repository for rides and bookings
#[trait_variant::make(RideRepository: Send)]
pub trait LocalRideRepository {
    async fn create_ride(&self, ride: &Ride) -> RideResult<()>;

    async fn find_ride(&self, ride_id: &RideId) -> RideResult<Option<Ride>>;

    /// Ride plus driver summary, for booking responses
    async fn find_ride_with_driver(
        &self,
        ride_id: &RideId,
    ) -> RideResult<Option<(Ride, DriverSummary)>>;

    /// Open rides whose destination contains the given text
    /// (case-insensitive)
    async fn search_available(&self, destination: &str)
    -> RideResult<Vec<(Ride, DriverSummary)>>;

    async fn plate_exists(&self, plate: &VehiclePlate) -> RideResult<bool>;

    async fn booking_exists(&self, ride_id: &RideId, passenger_id: &UserId) -> RideResult<bool>;

    /// Atomically claim one seat and record the booking.
    ///
    /// The seat decrement is guarded by `available_seats > 0` in SQL, so
    /// concurrent bookings can never drive the counter negative.
    async fn book_seat(&self, booking: &Booking) -> RideResult<()>;

    /// Rides the user has booked, each with driver and passenger details
    async fn booked_rides(&self, passenger_id: &UserId) -> RideResult<Vec<BookedRide>>;
}
