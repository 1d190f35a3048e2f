//! Chat Repository Trait

use chrono::{DateTime, Utc};
use kernel::id::{RideId, UserId};

use crate::domain::entity::Message;
use crate::error::ChatResult;

/// Sender fields joined onto message rows
#[derive(Debug, Clone)]
pub struct SenderSummary {
    pub public_id: String,
    pub name: String,
    pub profile_image: Option<String>,
}

/// A thread member (the driver or a booked passenger)
#[derive(Debug, Clone)]
pub struct MemberSummary {
    pub public_id: String,
    pub name: String,
    pub profile_image: Option<String>,
}

/// One entry in the thread list
#[derive(Debug, Clone)]
pub struct ThreadSummary {
    pub ride_id: RideId,
    pub driver_name: String,
    pub driver_profile_image: Option<String>,
    pub latest_message: Option<String>,
    pub latest_sent_at: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

/// Repository for ride-thread messages
#[trait_variant::make(ChatRepository: Send)]
pub trait LocalChatRepository {
    async fn ride_exists(&self, ride_id: &RideId) -> ChatResult<bool>;

    /// Thread membership: the ride's driver or a passenger with a booking
    async fn is_member(&self, ride_id: &RideId, user_id: &UserId) -> ChatResult<bool>;

    async fn create_message(&self, message: &Message) -> ChatResult<()>;

    /// Sender details for a single user
    async fn sender_summary(&self, user_id: &UserId) -> ChatResult<Option<SenderSummary>>;

    /// Full thread ordered by send time, with sender details
    async fn thread_messages(
        &self,
        ride_id: &RideId,
    ) -> ChatResult<Vec<(Message, SenderSummary)>>;

    /// Driver plus booked passengers
    async fn thread_members(&self, ride_id: &RideId) -> ChatResult<Vec<MemberSummary>>;

    /// Mark thread messages readable by the user as read, returning how
    /// many changed
    async fn mark_read(&self, ride_id: &RideId, user_id: &UserId) -> ChatResult<u64>;

    /// One summary per ride the user participates in
    async fn threads(&self, user_id: &UserId) -> ChatResult<Vec<ThreadSummary>>;
}
