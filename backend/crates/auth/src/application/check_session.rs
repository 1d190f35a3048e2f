//! Check Session Use Case
//!
//! Validates a session token against the server-side session store and the
//! client fingerprint, applying the sliding extension for "Remember Me"
//! sessions.

use std::sync::Arc;

use kernel::role::UserRole;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};

/// Session status returned to the client
pub struct SessionStatus {
    pub public_id: String,
    pub role: UserRole,
    pub expires_at_ms: i64,
}

/// Check session use case
pub struct CheckSessionUseCase<R: SessionRepository> {
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R: SessionRepository + Sync + 'static> CheckSessionUseCase<R> {
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve a token to a live session.
    ///
    /// The session row is the source of truth: a valid signature over an
    /// expired or deleted row is still rejected.
    pub async fn get_session(
        &self,
        token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Session> {
        let session_id = session_token::parse(&self.config.session_secret, token)?;

        let mut session = self
            .repo
            .find_session(session_id, fingerprint_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.repo.delete_session(session.session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        session.touch();
        session.extend_if_needed(chrono::Duration::milliseconds(
            self.config.session_ttl_long_ms(),
        ));

        // Activity bookkeeping happens off the request path
        let repo = Arc::clone(&self.repo);
        let update = session.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update_session(&update).await {
                tracing::warn!(error = %e, "Failed to persist session activity");
            }
        });

        Ok(session)
    }

    pub async fn execute(&self, token: &str, fingerprint_hash: &[u8]) -> AuthResult<SessionStatus> {
        let session = self.get_session(token, fingerprint_hash).await?;
        Ok(SessionStatus {
            public_id: session.public_id.to_string(),
            role: session.user_role,
            expires_at_ms: session.expires_at_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use uuid::Uuid;

    use crate::domain::value_object::{public_id::PublicId, user_id::UserId};

    #[derive(Default)]
    struct MemorySessions {
        rows: Mutex<HashMap<Uuid, Session>>,
    }

    impl SessionRepository for MemorySessions {
        async fn create_session(&self, session: &Session) -> AuthResult<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(session.session_id, session.clone());
            Ok(())
        }

        async fn find_session(
            &self,
            session_id: Uuid,
            fingerprint_hash: &[u8],
        ) -> AuthResult<Option<Session>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .get(&session_id)
                .filter(|s| s.client_fingerprint_hash == fingerprint_hash)
                .cloned())
        }

        async fn update_session(&self, session: &Session) -> AuthResult<()> {
            self.rows
                .lock()
                .unwrap()
                .insert(session.session_id, session.clone());
            Ok(())
        }

        async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
            self.rows.lock().unwrap().remove(&session_id);
            Ok(())
        }

        async fn delete_all_sessions(
            &self,
            _user_id: &UserId,
            _except: Option<Uuid>,
        ) -> AuthResult<u64> {
            Ok(0)
        }

        async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
            Ok(0)
        }
    }

    fn fixture() -> (Arc<MemorySessions>, Arc<AuthConfig>, Session, String) {
        let config = AuthConfig::development();
        let session = Session::new(
            UserId::new(),
            PublicId::new(),
            UserRole::Passenger,
            false,
            vec![7u8; 32],
            Some("127.0.0.1".to_string()),
            Some("TestAgent/1.0".to_string()),
            chrono::Duration::hours(12),
        );
        let token = session_token::generate(&config.session_secret, session.session_id);
        (Arc::new(MemorySessions::default()), Arc::new(config), session, token)
    }

    #[tokio::test]
    async fn test_valid_token_resolves_session() {
        let (repo, config, session, token) = fixture();
        repo.create_session(&session).await.unwrap();

        let use_case = CheckSessionUseCase::new(Arc::clone(&repo), config);
        let found = use_case.get_session(&token, &[7u8; 32]).await.unwrap();
        assert_eq!(found.session_id, session.session_id);

        let status = use_case.execute(&token, &[7u8; 32]).await.unwrap();
        assert_eq!(status.public_id, session.public_id.to_string());
    }

    #[tokio::test]
    async fn test_fingerprint_mismatch_rejected() {
        let (repo, config, session, token) = fixture();
        repo.create_session(&session).await.unwrap();

        let use_case = CheckSessionUseCase::new(repo, config);
        assert!(matches!(
            use_case.get_session(&token, &[8u8; 32]).await,
            Err(AuthError::SessionInvalid)
        ));
    }

    #[tokio::test]
    async fn test_expired_session_deleted_on_check() {
        let (repo, config, mut session, token) = fixture();
        session.expires_at_ms = chrono::Utc::now().timestamp_millis() - 1000;
        repo.create_session(&session).await.unwrap();

        let use_case = CheckSessionUseCase::new(Arc::clone(&repo), config);
        assert!(use_case.get_session(&token, &[7u8; 32]).await.is_err());
        assert!(repo.rows.lock().unwrap().is_empty());
    }
}
