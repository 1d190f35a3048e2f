//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::RideThread;
use crate::domain::entity::Message;
use crate::domain::repository::{MemberSummary, SenderSummary, ThreadSummary};

/// Send message request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub ride_id: Uuid,
    /// Absent for group messages
    pub receiver_id: Option<Uuid>,
    pub content: String,
}

/// A thread participant
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub public_id: String,
    pub name: String,
    pub profile_image: Option<String>,
}

impl MemberResponse {
    fn from_summary(m: &MemberSummary) -> Self {
        Self {
            public_id: m.public_id.clone(),
            name: m.name.clone(),
            profile_image: m.profile_image.as_ref().map(|f| format!("/media/{f}")),
        }
    }
}

/// Message sender details
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderResponse {
    pub public_id: String,
    pub name: String,
    pub profile_image: Option<String>,
}

impl SenderResponse {
    fn from_summary(s: &SenderSummary) -> Self {
        Self {
            public_id: s.public_id.clone(),
            name: s.name.clone(),
            profile_image: s.profile_image.as_ref().map(|f| format!("/media/{f}")),
        }
    }
}

/// A single message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message_id: String,
    pub ride_id: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub is_read: bool,
    pub sender: SenderResponse,
}

impl MessageResponse {
    pub fn from_parts(message: &Message, sender: &SenderSummary) -> Self {
        Self {
            message_id: message.message_id.to_string(),
            ride_id: message.ride_id.to_string(),
            content: message.content.as_str().to_string(),
            sent_at: message.sent_at,
            is_read: message.is_read,
            sender: SenderResponse::from_summary(sender),
        }
    }
}

/// Full ride thread
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResponse {
    pub ride_id: String,
    pub messages: Vec<MessageResponse>,
    pub members: Vec<MemberResponse>,
}

impl ThreadResponse {
    pub fn from_thread(ride_id: &str, thread: &RideThread) -> Self {
        Self {
            ride_id: ride_id.to_string(),
            messages: thread
                .messages
                .iter()
                .map(|(m, s)| MessageResponse::from_parts(m, s))
                .collect(),
            members: thread
                .members
                .iter()
                .map(MemberResponse::from_summary)
                .collect(),
        }
    }
}

/// One entry in the thread list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadListEntry {
    pub ride_id: String,
    pub driver_name: String,
    pub driver_profile_image: Option<String>,
    pub latest_message: Option<String>,
    pub latest_sent_at: Option<DateTime<Utc>>,
    pub unread_count: i64,
}

impl ThreadListEntry {
    pub fn from_summary(t: &ThreadSummary) -> Self {
        Self {
            ride_id: t.ride_id.to_string(),
            driver_name: t.driver_name.clone(),
            driver_profile_image: t
                .driver_profile_image
                .as_ref()
                .map(|f| format!("/media/{f}")),
            latest_message: t.latest_message.clone(),
            latest_sent_at: t.latest_sent_at,
            unread_count: t.unread_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_group_message() {
        let req: SendMessageRequest = serde_json::from_str(
            r#"{"rideId":"7f2c1b34-6a1e-4f2a-9c8d-0f3a5b6c7d8e","content":"hi all"}"#,
        )
        .unwrap();
        assert!(req.receiver_id.is_none());
        assert_eq!(req.content, "hi all");
    }
}
