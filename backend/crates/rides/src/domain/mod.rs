//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{Booking, BookingStatus, Ride};
pub use repository::{BookedRide, DriverSummary, PassengerSummary, RideRepository};
pub use value_object::{PricePerSeat, SeatCount, VehiclePlate};
