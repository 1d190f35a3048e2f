//! Ride Thread Use Case
//!
//! Reads a ride's full thread and marks it read for the caller.

use std::sync::Arc;

use kernel::id::{RideId, UserId};

use crate::domain::entity::Message;
use crate::domain::repository::{ChatRepository, MemberSummary, SenderSummary};
use crate::error::{ChatError, ChatResult};

/// A thread with its messages and member list
pub struct RideThread {
    pub messages: Vec<(Message, SenderSummary)>,
    pub members: Vec<MemberSummary>,
}

pub struct RideThreadUseCase<R: ChatRepository> {
    repo: Arc<R>,
}

impl<R: ChatRepository> RideThreadUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, ride_id: &RideId, user_id: &UserId) -> ChatResult<RideThread> {
        if !self.repo.ride_exists(ride_id).await? {
            return Err(ChatError::RideNotFound);
        }
        if !self.repo.is_member(ride_id, user_id).await? {
            return Err(ChatError::NotAMember);
        }

        // Reading the thread clears its unread state for this user
        let marked = self.repo.mark_read(ride_id, user_id).await?;
        if marked > 0 {
            tracing::debug!(ride_id = %ride_id, marked, "Messages marked read");
        }

        let messages = self.repo.thread_messages(ride_id).await?;
        let members = self.repo.thread_members(ride_id).await?;

        Ok(RideThread { messages, members })
    }
}
