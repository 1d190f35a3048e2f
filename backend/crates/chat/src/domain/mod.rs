//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::Message;
pub use repository::{ChatRepository, MemberSummary, SenderSummary, ThreadSummary};
pub use value_object::MessageContent;
