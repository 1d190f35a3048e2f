//! Application Layer

pub mod book_ride;
pub mod booked_rides;
pub mod search_rides;
pub mod share_ride;

pub use book_ride::BookRideUseCase;
pub use booked_rides::BookedRidesUseCase;
pub use search_rides::SearchRidesUseCase;
pub use share_ride::{ShareRideInput, ShareRideUseCase};
