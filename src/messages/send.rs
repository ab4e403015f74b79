use axum::{debug_handler, extract::State};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use time::OffsetDateTime;

use crate::{extract::Json, ids, AppError, AppResult, Id, Required};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendBody {
    #[serde(default, deserialize_with = "ids::flexible")]
    pub sender_id: Option<Id>,
    #[serde(default, deserialize_with = "ids::flexible")]
    pub receiver_id: Option<Id>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub message: &'static str,
    pub message_id: Id,
    #[serde(serialize_with = "crate::db::rfc3339::serialize")]
    pub timestamp: OffsetDateTime,
}

/// Appends an unread message from sender to receiver.
pub async fn send_message(
    db_pool: &SqlitePool,
    SendBody { sender_id, receiver_id, content }: SendBody,
) -> AppResult<SentMessage> {
    const MISSING: &str = "Missing required fields";
    let sender_id = sender_id.required(MISSING)?;
    let receiver_id = receiver_id.required(MISSING)?;
    let content = content.required(MISSING)?;

    if sender_id == receiver_id {
        return Err(AppError::Validation("Cannot send a message to yourself".to_owned()));
    }

    let (message_id, timestamp): (Id, OffsetDateTime) = sqlx::query_as(
        "INSERT INTO messages (sender_id, receiver_id, content) VALUES (?, ?, ?) RETURNING id, timestamp",
    )
    .bind(sender_id)
    .bind(receiver_id)
    .bind(&content)
    .fetch_one(db_pool)
    .await?;

    tracing::info!(message_id, sender_id, receiver_id, "message sent");

    Ok(SentMessage {
        message: "Message sent",
        message_id,
        timestamp,
    })
}

#[debug_handler]
pub async fn send(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<SendBody>,
) -> AppResult<Json<SentMessage>> {
    Ok(Json(send_message(&db_pool, body).await?))
}
