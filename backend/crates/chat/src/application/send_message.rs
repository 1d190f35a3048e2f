//! Send Message Use Case
//!
//! Posts into a ride thread after checking membership.

use std::sync::Arc;

use kernel::id::{RideId, UserId};

use crate::domain::entity::Message;
use crate::domain::repository::ChatRepository;
use crate::domain::value_object::MessageContent;
use crate::error::{ChatError, ChatResult};

pub struct SendMessageInput {
    pub ride_id: RideId,
    pub receiver_id: Option<UserId>,
    pub content: String,
}

pub struct SendMessageUseCase<R: ChatRepository> {
    repo: Arc<R>,
}

impl<R: ChatRepository> SendMessageUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, sender_id: UserId, input: SendMessageInput) -> ChatResult<Message> {
        let content = MessageContent::new(&input.content)
            .map_err(|e| ChatError::Validation(e.to_string()))?;

        if !self.repo.ride_exists(&input.ride_id).await? {
            return Err(ChatError::RideNotFound);
        }
        if !self.repo.is_member(&input.ride_id, &sender_id).await? {
            return Err(ChatError::NotAMember);
        }

        // A direct message may only address another member of the thread
        if let Some(receiver_id) = &input.receiver_id {
            if !self.repo.is_member(&input.ride_id, receiver_id).await? {
                return Err(ChatError::NotAMember);
            }
        }

        let message = Message::new(input.ride_id, sender_id, input.receiver_id, content);
        self.repo.create_message(&message).await?;

        tracing::debug!(
            message_id = %message.message_id,
            ride_id = %message.ride_id,
            "Message sent"
        );

        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct FixedMembers {
        ride_id: RideId,
        members: Vec<UserId>,
        sent: Mutex<Vec<Message>>,
    }

    impl FixedMembers {
        fn new(ride_id: RideId, members: Vec<UserId>) -> Self {
            Self {
                ride_id,
                members,
                sent: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatRepository for FixedMembers {
        async fn ride_exists(&self, ride_id: &RideId) -> ChatResult<bool> {
            Ok(*ride_id == self.ride_id)
        }
        async fn is_member(&self, ride_id: &RideId, user_id: &UserId) -> ChatResult<bool> {
            Ok(*ride_id == self.ride_id && self.members.contains(user_id))
        }
        async fn create_message(&self, message: &Message) -> ChatResult<()> {
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
        async fn sender_summary(
            &self,
            _user_id: &UserId,
        ) -> ChatResult<Option<crate::domain::repository::SenderSummary>> {
            Ok(None)
        }
        async fn thread_messages(
            &self,
            _ride_id: &RideId,
        ) -> ChatResult<Vec<(Message, crate::domain::repository::SenderSummary)>> {
            Ok(Vec::new())
        }
        async fn thread_members(
            &self,
            _ride_id: &RideId,
        ) -> ChatResult<Vec<crate::domain::repository::MemberSummary>> {
            Ok(Vec::new())
        }
        async fn mark_read(&self, _ride_id: &RideId, _user_id: &UserId) -> ChatResult<u64> {
            Ok(0)
        }
        async fn threads(
            &self,
            _user_id: &UserId,
        ) -> ChatResult<Vec<crate::domain::repository::ThreadSummary>> {
            Ok(Vec::new())
        }
    }

    fn input(ride_id: RideId, receiver_id: Option<UserId>) -> SendMessageInput {
        SendMessageInput {
            ride_id,
            receiver_id,
            content: "See you at the pickup point".to_string(),
        }
    }

    #[tokio::test]
    async fn test_member_posts_group_message() {
        let ride_id = RideId::new();
        let sender = UserId::new();
        let repo = Arc::new(FixedMembers::new(ride_id, vec![sender]));

        let use_case = SendMessageUseCase::new(Arc::clone(&repo));
        let message = use_case.execute(sender, input(ride_id, None)).await.unwrap();

        assert!(message.receiver_id.is_none());
        assert_eq!(repo.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_direct_message_to_member_allowed() {
        let ride_id = RideId::new();
        let sender = UserId::new();
        let receiver = UserId::new();
        let repo = Arc::new(FixedMembers::new(ride_id, vec![sender, receiver]));

        let use_case = SendMessageUseCase::new(repo);
        let message = use_case
            .execute(sender, input(ride_id, Some(receiver)))
            .await
            .unwrap();

        assert_eq!(message.receiver_id, Some(receiver));
    }

    #[tokio::test]
    async fn test_direct_message_to_outsider_rejected() {
        let ride_id = RideId::new();
        let sender = UserId::new();
        let repo = Arc::new(FixedMembers::new(ride_id, vec![sender]));

        let use_case = SendMessageUseCase::new(Arc::clone(&repo));
        let result = use_case
            .execute(sender, input(ride_id, Some(UserId::new())))
            .await;

        assert!(matches!(result, Err(ChatError::NotAMember)));
        assert!(repo.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_member_sender_rejected() {
        let ride_id = RideId::new();
        let repo = Arc::new(FixedMembers::new(ride_id, vec![UserId::new()]));

        let use_case = SendMessageUseCase::new(repo);
        let result = use_case.execute(UserId::new(), input(ride_id, None)).await;

        assert!(matches!(result, Err(ChatError::NotAMember)));
    }
}
