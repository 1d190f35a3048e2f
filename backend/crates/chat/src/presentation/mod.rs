//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ChatAppState;
pub use router::{
    messages_router, messages_router_generic, ride_thread_router, ride_thread_router_generic,
};
