//! Application Layer

pub mod ride_thread;
pub mod send_message;
pub mod thread_list;

pub use ride_thread::{RideThread, RideThreadUseCase};
pub use send_message::{SendMessageInput, SendMessageUseCase};
pub use thread_list::ThreadListUseCase;
