use axum::{debug_handler, extract::State};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{extract::{Json, Path}, AppResult, Id};

use super::{Connection, ConnectionStatus};

/// An accepted connection, with both sides named.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Session {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub connection: Connection,
    pub learner_name: String,
    pub teacher_name: String,
}

/// Accepted connections where the user is either the learner or the teacher.
pub async fn list_accepted_sessions(db_pool: &SqlitePool, user_id: Id) -> AppResult<Vec<Session>> {
    let sessions: Vec<Session> = sqlx::query_as(
        "SELECT c.id, c.learner_id, c.teacher_id, c.subject, c.status, c.created_at,
                u1.username AS learner_name,
                u2.username AS teacher_name
         FROM connections c
         JOIN users u1 ON c.learner_id = u1.id
         JOIN users u2 ON c.teacher_id = u2.id
         WHERE (c.learner_id = ?1 OR c.teacher_id = ?1)
           AND c.status = ?2
         ORDER BY c.id",
    )
    .bind(user_id)
    .bind(ConnectionStatus::Accepted.as_str())
    .fetch_all(db_pool)
    .await?;

    tracing::debug!(user_id, sessions = sessions.len(), "accepted sessions listed");
    Ok(sessions)
}

#[debug_handler]
pub async fn sessions(
    Path(user_id): Path<Id>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<Session>>> {
    Ok(Json(list_accepted_sessions(&db_pool, user_id).await?))
}
