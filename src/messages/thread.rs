use axum::{debug_handler, extract::State};
use serde::Serialize;
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{extract::{Json, Path}, AppResult, Id};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ThreadMessage {
    pub id: Id,
    pub sender_id: Id,
    pub receiver_id: Id,
    pub content: String,
    #[serde(serialize_with = "crate::db::rfc3339::serialize")]
    pub timestamp: OffsetDateTime,
    pub read: bool,
    pub sender_name: String,
    pub receiver_name: String,
}

/// The whole conversation between two users, oldest first. Everything
/// `other_user_id` sent to `user_id` is marked read on every call; the
/// returned rows still show the flags as they were before.
pub async fn fetch_thread(db_pool: &SqlitePool, user_id: Id, other_user_id: Id) -> AppResult<Vec<ThreadMessage>> {
    let messages: Vec<ThreadMessage> = sqlx::query_as(
        "SELECT m.id, m.sender_id, m.receiver_id, m.content, m.timestamp, m.read,
                sender.username AS sender_name,
                receiver.username AS receiver_name
         FROM messages m
         JOIN users sender ON m.sender_id = sender.id
         JOIN users receiver ON m.receiver_id = receiver.id
         WHERE (m.sender_id = ?1 AND m.receiver_id = ?2)
            OR (m.sender_id = ?2 AND m.receiver_id = ?1)
         ORDER BY m.timestamp ASC, m.id ASC",
    )
    .bind(user_id)
    .bind(other_user_id)
    .fetch_all(db_pool)
    .await?;

    let marked = sqlx::query("UPDATE messages SET read = 1 WHERE receiver_id = ? AND sender_id = ?")
        .bind(user_id)
        .bind(other_user_id)
        .execute(db_pool)
        .await?
        .rows_affected();

    tracing::debug!(user_id, other_user_id, messages = messages.len(), marked, "thread fetched");
    Ok(messages)
}

#[debug_handler]
pub async fn thread(
    Path((user_id, other_user_id)): Path<(Id, Id)>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<ThreadMessage>>> {
    Ok(Json(fetch_thread(&db_pool, user_id, other_user_id).await?))
}
