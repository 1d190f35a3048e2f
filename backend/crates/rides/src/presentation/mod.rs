//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::RidesAppState;
pub use router::{rides_router, rides_router_generic};
