//! Thread List Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{ChatRepository, ThreadSummary};
use crate::error::ChatResult;

pub struct ThreadListUseCase<R: ChatRepository> {
    repo: Arc<R>,
}

impl<R: ChatRepository> ThreadListUseCase<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> ChatResult<Vec<ThreadSummary>> {
        self.repo.threads(user_id).await
    }
}
