//! Chat (Ride Threads) Backend Module
//!
//! Per-ride group messaging:
//! - Thread membership is the ride's driver plus its booked passengers
//! - Reading a thread marks messages readable by the caller as read
//! - The thread list carries a latest-message preview and unread count

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{ChatError, ChatResult};
pub use infra::postgres::PgChatRepository;
pub use presentation::router::{messages_router, ride_thread_router};
