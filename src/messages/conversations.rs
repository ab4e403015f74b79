use axum::{debug_handler, extract::State};
use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{extract::{Json, Path}, AppResult, Id};

/// One inbox row: the latest message exchanged with one counterpart.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Conversation {
    pub other_user_id: Id,
    pub other_user_name: String,
    pub last_message: String,
    #[serde(serialize_with = "crate::db::rfc3339::serialize")]
    pub last_message_time: OffsetDateTime,
}

/// Most recent conversation first. Message ids come from AUTOINCREMENT and so
/// strictly increase in send order; the highest id in a group is its latest
/// message, and ordering by it stays stable within one timestamp second.
pub async fn list_conversations(db_pool: &SqlitePool, user_id: Id) -> AppResult<Vec<Conversation>> {
    let conversations: Vec<Conversation> = sqlx::query_as(
        "SELECT u.id AS other_user_id,
                u.username AS other_user_name,
                m.content AS last_message,
                m.timestamp AS last_message_time
         FROM (
            SELECT CASE WHEN sender_id = ?1 THEN receiver_id ELSE sender_id END AS other_id,
                   MAX(id) AS max_id
            FROM messages
            WHERE sender_id = ?1 OR receiver_id = ?1
            GROUP BY other_id
         ) AS latest
         JOIN messages m ON m.id = latest.max_id
         JOIN users u ON u.id = latest.other_id
         ORDER BY m.id DESC",
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await?;

    tracing::debug!(user_id, conversations = conversations.len(), "conversations listed");
    Ok(conversations)
}

#[debug_handler]
pub async fn conversations(
    Path(user_id): Path<Id>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<Conversation>>> {
    Ok(Json(list_conversations(&db_pool, user_id).await?))
}
