//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use kernel::id::{MessageId, RideId, UserId};

use crate::domain::entity::Message;
use crate::domain::repository::{
    ChatRepository, MemberSummary, SenderSummary, ThreadSummary,
};
use crate::domain::value_object::MessageContent;
use crate::error::ChatResult;

/// PostgreSQL-backed chat repository
#[derive(Clone)]
pub struct PgChatRepository {
    pool: PgPool,
}

impl PgChatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ChatRepository for PgChatRepository {
    async fn ride_exists(&self, ride_id: &RideId) -> ChatResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM rides WHERE ride_id = $1)")
                .bind(ride_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn is_member(&self, ride_id: &RideId, user_id: &UserId) -> ChatResult<bool> {
        let member: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM rides
                WHERE ride_id = $1 AND driver_id = $2
                UNION ALL
                SELECT 1 FROM bookings
                WHERE ride_id = $1 AND passenger_id = $2
            )
            "#,
        )
        .bind(ride_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(member)
    }

    async fn create_message(&self, message: &Message) -> ChatResult<()> {
        sqlx::query(
            r#"
            INSERT INTO messages (
                message_id,
                ride_id,
                sender_id,
                receiver_id,
                content,
                sent_at,
                is_read
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(message.message_id.as_uuid())
        .bind(message.ride_id.as_uuid())
        .bind(message.sender_id.as_uuid())
        .bind(message.receiver_id.as_ref().map(|id| *id.as_uuid()))
        .bind(message.content.as_str())
        .bind(message.sent_at)
        .bind(message.is_read)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn sender_summary(&self, user_id: &UserId) -> ChatResult<Option<SenderSummary>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT
                u.public_id,
                p.first_name || ' ' || p.last_name AS name,
                p.profile_image
            FROM users u
            JOIN user_profiles p ON p.user_id = u.user_id
            WHERE u.user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| SenderSummary {
            public_id: r.public_id,
            name: r.name,
            profile_image: r.profile_image,
        }))
    }

    async fn thread_messages(
        &self,
        ride_id: &RideId,
    ) -> ChatResult<Vec<(Message, SenderSummary)>> {
        let rows = sqlx::query_as::<_, MessageWithSenderRow>(
            r#"
            SELECT
                m.message_id,
                m.ride_id,
                m.sender_id,
                m.receiver_id,
                m.content,
                m.sent_at,
                m.is_read,
                u.public_id AS sender_public_id,
                p.first_name || ' ' || p.last_name AS sender_name,
                p.profile_image AS sender_profile_image
            FROM messages m
            JOIN users u ON u.user_id = m.sender_id
            JOIN user_profiles p ON p.user_id = m.sender_id
            WHERE m.ride_id = $1
            ORDER BY m.sent_at
            "#,
        )
        .bind(ride_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_parts()).collect())
    }

    async fn thread_members(&self, ride_id: &RideId) -> ChatResult<Vec<MemberSummary>> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT
                u.public_id,
                p.first_name || ' ' || p.last_name AS name,
                p.profile_image
            FROM rides r
            JOIN users u ON u.user_id = r.driver_id
            JOIN user_profiles p ON p.user_id = r.driver_id
            WHERE r.ride_id = $1
            UNION ALL
            SELECT
                u.public_id,
                p.first_name || ' ' || p.last_name AS name,
                p.profile_image
            FROM bookings b
            JOIN users u ON u.user_id = b.passenger_id
            JOIN user_profiles p ON p.user_id = b.passenger_id
            WHERE b.ride_id = $1
            "#,
        )
        .bind(ride_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| MemberSummary {
                public_id: r.public_id,
                name: r.name,
                profile_image: r.profile_image,
            })
            .collect())
    }

    async fn mark_read(&self, ride_id: &RideId, user_id: &UserId) -> ChatResult<u64> {
        let updated = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE ride_id = $1
              AND sender_id != $2
              AND (receiver_id IS NULL OR receiver_id = $2)
              AND NOT is_read
            "#,
        )
        .bind(ride_id.as_uuid())
        .bind(user_id.as_uuid())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated)
    }

    async fn threads(&self, user_id: &UserId) -> ChatResult<Vec<ThreadSummary>> {
        let ride_rows = sqlx::query_as::<_, ThreadRideRow>(
            r#"
            SELECT
                r.ride_id,
                p.first_name || ' ' || p.last_name AS driver_name,
                p.profile_image AS driver_profile_image
            FROM rides r
            JOIN user_profiles p ON p.user_id = r.driver_id
            WHERE r.driver_id = $1
               OR EXISTS (
                    SELECT 1 FROM bookings b
                    WHERE b.ride_id = r.ride_id AND b.passenger_id = $1
               )
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        if ride_rows.is_empty() {
            return Ok(Vec::new());
        }

        let ride_ids: Vec<Uuid> = ride_rows.iter().map(|r| r.ride_id).collect();

        let latest_rows = sqlx::query_as::<_, LatestMessageRow>(
            r#"
            SELECT DISTINCT ON (ride_id)
                ride_id,
                content,
                sent_at
            FROM messages
            WHERE ride_id = ANY($1)
            ORDER BY ride_id, sent_at DESC
            "#,
        )
        .bind(&ride_ids)
        .fetch_all(&self.pool)
        .await?;

        let unread_rows = sqlx::query_as::<_, UnreadRow>(
            r#"
            SELECT ride_id, COUNT(*) AS unread
            FROM messages
            WHERE ride_id = ANY($1)
              AND sender_id != $2
              AND (receiver_id IS NULL OR receiver_id = $2)
              AND NOT is_read
            GROUP BY ride_id
            "#,
        )
        .bind(&ride_ids)
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let summaries = ride_rows
            .into_iter()
            .map(|ride| {
                let latest = latest_rows.iter().find(|m| m.ride_id == ride.ride_id);
                let unread = unread_rows
                    .iter()
                    .find(|u| u.ride_id == ride.ride_id)
                    .map(|u| u.unread)
                    .unwrap_or(0);

                ThreadSummary {
                    ride_id: RideId::from_uuid(ride.ride_id),
                    driver_name: ride.driver_name,
                    driver_profile_image: ride.driver_profile_image,
                    latest_message: latest.map(|m| m.content.clone()),
                    latest_sent_at: latest.map(|m| m.sent_at),
                    unread_count: unread,
                }
            })
            .collect();

        Ok(summaries)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct MessageWithSenderRow {
    message_id: Uuid,
    ride_id: Uuid,
    sender_id: Uuid,
    receiver_id: Option<Uuid>,
    content: String,
    sent_at: DateTime<Utc>,
    is_read: bool,
    sender_public_id: String,
    sender_name: String,
    sender_profile_image: Option<String>,
}

impl MessageWithSenderRow {
    fn into_parts(self) -> (Message, SenderSummary) {
        let message = Message {
            message_id: MessageId::from_uuid(self.message_id),
            ride_id: RideId::from_uuid(self.ride_id),
            sender_id: UserId::from_uuid(self.sender_id),
            receiver_id: self.receiver_id.map(UserId::from_uuid),
            content: MessageContent::from_db(self.content),
            sent_at: self.sent_at,
            is_read: self.is_read,
        };
        let sender = SenderSummary {
            public_id: self.sender_public_id,
            name: self.sender_name,
            profile_image: self.sender_profile_image,
        };
        (message, sender)
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    public_id: String,
    name: String,
    profile_image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct ThreadRideRow {
    ride_id: Uuid,
    driver_name: String,
    driver_profile_image: Option<String>,
}

#[derive(sqlx::FromRow)]
struct LatestMessageRow {
    ride_id: Uuid,
    content: String,
    sent_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UnreadRow {
    ride_id: Uuid,
    unread: i64,
}
