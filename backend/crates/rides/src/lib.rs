//! Rides (Offers & Bookings) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Ride and booking entities, value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Rules
//! - Only drivers create ride offers; only passengers search and book
//! - One booking per (ride, passenger), one seat per booking
//! - Seat decrements are guarded in SQL so the counter never goes negative

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{RideError, RideResult};
pub use infra::postgres::PgRideRepository;
pub use presentation::router::{rides_router, rides_router_generic};
