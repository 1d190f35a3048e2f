//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;
use uuid::Uuid;

use kernel::CurrentUser;
use kernel::id::{RideId, UserId};

use crate::application::{
    RideThreadUseCase, SendMessageInput, SendMessageUseCase, ThreadListUseCase,
};
use crate::domain::repository::{ChatRepository, SenderSummary};
use crate::error::ChatResult;
use crate::presentation::dto::{
    MessageResponse, SendMessageRequest, ThreadListEntry, ThreadResponse,
};

/// Shared state for chat handlers
pub struct ChatAppState<R: ChatRepository> {
    pub repo: Arc<R>,
}

impl<R: ChatRepository> Clone for ChatAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// POST /api/v1/messages
pub async fn send_message<R>(
    State(state): State<ChatAppState<R>>,
    current_user: CurrentUser,
    Json(req): Json<SendMessageRequest>,
) -> ChatResult<impl IntoResponse>
where
    R: ChatRepository + Send + Sync + 'static,
{
    let use_case = SendMessageUseCase::new(state.repo.clone());
    let sender_id = UserId::from_uuid(current_user.user_id);

    let input = SendMessageInput {
        ride_id: RideId::from_uuid(req.ride_id),
        receiver_id: req.receiver_id.map(UserId::from_uuid),
        content: req.content,
    };

    let message = use_case.execute(sender_id, input).await?;

    let sender = state
        .repo
        .sender_summary(&sender_id)
        .await?
        .unwrap_or(SenderSummary {
            public_id: current_user.public_id,
            name: String::new(),
            profile_image: None,
        });

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::from_parts(&message, &sender)),
    ))
}

/// GET /api/v1/rides/{ride_id}/messages
pub async fn ride_thread<R>(
    State(state): State<ChatAppState<R>>,
    current_user: CurrentUser,
    Path(ride_id): Path<Uuid>,
) -> ChatResult<Json<ThreadResponse>>
where
    R: ChatRepository + Send + Sync + 'static,
{
    let use_case = RideThreadUseCase::new(state.repo.clone());
    let ride = RideId::from_uuid(ride_id);
    let user_id = UserId::from_uuid(current_user.user_id);

    let thread = use_case.execute(&ride, &user_id).await?;

    Ok(Json(ThreadResponse::from_thread(
        &ride.to_string(),
        &thread,
    )))
}

/// GET /api/v1/messages/threads
pub async fn thread_list<R>(
    State(state): State<ChatAppState<R>>,
    current_user: CurrentUser,
) -> ChatResult<Json<Vec<ThreadListEntry>>>
where
    R: ChatRepository + Send + Sync + 'static,
{
    let use_case = ThreadListUseCase::new(state.repo.clone());
    let user_id = UserId::from_uuid(current_user.user_id);

    let threads = use_case.execute(&user_id).await?;

    Ok(Json(
        threads.iter().map(ThreadListEntry::from_summary).collect(),
    ))
}
