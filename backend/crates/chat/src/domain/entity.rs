//! Message Entity

use chrono::{DateTime, Utc};

use kernel::id::{MessageId, RideId, UserId};

use crate::domain::value_object::MessageContent;

/// A message in a ride's group thread.
///
/// `receiver_id` is `None` for messages addressed to the whole thread;
/// a direct message carries the recipient.
#[derive(Debug, Clone)]
pub struct Message {
    pub message_id: MessageId,
    pub ride_id: RideId,
    pub sender_id: UserId,
    pub receiver_id: Option<UserId>,
    pub content: MessageContent,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
}

impl Message {
    pub fn new(
        ride_id: RideId,
        sender_id: UserId,
        receiver_id: Option<UserId>,
        content: MessageContent,
    ) -> Self {
        Self {
            message_id: MessageId::new(),
            ride_id,
            sender_id,
            receiver_id,
            content,
            sent_at: Utc::now(),
            is_read: false,
        }
    }

    /// Whether this message shows up unread for the given user
    pub fn is_unread_for(&self, user_id: &UserId) -> bool {
        if self.is_read || self.sender_id == *user_id {
            return false;
        }
        match &self.receiver_id {
            Some(receiver) => receiver == user_id,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(receiver: Option<UserId>) -> Message {
        Message::new(
            RideId::new(),
            UserId::new(),
            receiver,
            MessageContent::new("on my way").unwrap(),
        )
    }

    #[test]
    fn test_group_message_unread_for_others() {
        let msg = message(None);
        assert!(msg.is_unread_for(&UserId::new()));
        assert!(!msg.is_unread_for(&msg.sender_id.clone()));
    }

    #[test]
    fn test_direct_message_unread_only_for_receiver() {
        let receiver = UserId::new();
        let msg = message(Some(receiver));
        assert!(msg.is_unread_for(&receiver));
        assert!(!msg.is_unread_for(&UserId::new()));
    }

    #[test]
    fn test_read_message_not_unread() {
        let mut msg = message(None);
        msg.is_read = true;
        assert!(!msg.is_unread_for(&UserId::new()));
    }
}
