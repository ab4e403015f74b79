use axum::{debug_handler, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{extract::{Json, Path}, ids, AppError, AppResult, Id, Required};

use super::{status::Transition, Connection, ConnectionStatus};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectBody {
    #[serde(default, deserialize_with = "ids::flexible")]
    pub learner_id: Option<Id>,
    #[serde(default, deserialize_with = "ids::flexible")]
    pub teacher_id: Option<Id>,
    pub subject: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusBody {
    pub status: Option<String>,
}

/// A pending request as the teacher sees it.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PendingRequest {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub connection: Connection,
    pub learner_name: String,
}

/// Records a learner asking a teacher for a subject. Repeated requests for
/// the same pair are allowed.
pub async fn create_request(
    db_pool: &SqlitePool,
    ConnectBody { learner_id, teacher_id, subject }: ConnectBody,
) -> AppResult<Id> {
    const MISSING: &str = "Missing required fields";
    let learner_id = learner_id.required(MISSING)?;
    let teacher_id = teacher_id.required(MISSING)?;

    if learner_id == teacher_id {
        return Err(AppError::Validation("Cannot request yourself as a teacher".to_owned()));
    }

    let request_id = sqlx::query("INSERT INTO connections (learner_id, teacher_id, subject, status) VALUES (?, ?, ?, ?)")
        .bind(learner_id)
        .bind(teacher_id)
        .bind(&subject)
        .bind(ConnectionStatus::Pending.as_str())
        .execute(db_pool)
        .await?
        .last_insert_rowid();

    tracing::info!(request_id, learner_id, teacher_id, ?subject, "connection requested");
    Ok(request_id)
}

pub async fn list_pending_for_teacher(db_pool: &SqlitePool, teacher_id: Id) -> AppResult<Vec<PendingRequest>> {
    let requests: Vec<PendingRequest> = sqlx::query_as(
        "SELECT c.id, c.learner_id, c.teacher_id, c.subject, c.status, c.created_at,
                u.username AS learner_name
         FROM connections c
         JOIN users u ON c.learner_id = u.id
         WHERE c.teacher_id = ? AND c.status = ?
         ORDER BY c.id",
    )
    .bind(teacher_id)
    .bind(ConnectionStatus::Pending.as_str())
    .fetch_all(db_pool)
    .await?;

    tracing::debug!(teacher_id, pending = requests.len(), "pending requests listed");
    Ok(requests)
}

/// Moves a request to `status`, guarded by [`ConnectionStatus::transition`].
/// The write only lands if the status is still the one that was checked.
pub async fn set_status(db_pool: &SqlitePool, request_id: Id, status: Option<String>) -> AppResult<ConnectionStatus> {
    let next: ConnectionStatus = status.required("Missing status")?.parse()?;

    let Some((stored,)): Option<(String,)> = sqlx::query_as("SELECT status FROM connections WHERE id=?")
        .bind(request_id)
        .fetch_optional(db_pool)
        .await?
    else {
        return Err(AppError::NotFound("Request not found".to_owned()));
    };
    let current: ConnectionStatus = stored
        .parse()
        .map_err(|_| AppError::Conflict(format!("Request has unknown status {stored:?}")))?;

    if current.transition(next)? == Transition::Unchanged {
        tracing::debug!(request_id, %next, "status already set");
        return Ok(next);
    }

    swap_status(db_pool, request_id, current, next).await?;
    Ok(next)
}

/// Writes `to` only if the stored status is still `from`. A writer that lost
/// the race gets a conflict.
pub async fn swap_status(
    db_pool: &SqlitePool,
    request_id: Id,
    from: ConnectionStatus,
    to: ConnectionStatus,
) -> AppResult<()> {
    let updated = sqlx::query("UPDATE connections SET status=? WHERE id=? AND status=?")
        .bind(to.as_str())
        .bind(request_id)
        .bind(from.as_str())
        .execute(db_pool)
        .await?
        .rows_affected();
    if updated == 0 {
        return Err(AppError::Conflict("Request was updated by someone else".to_owned()));
    }

    tracing::info!(request_id, %from, %to, "request status changed");
    Ok(())
}

#[debug_handler]
pub async fn connect(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<ConnectBody>,
) -> AppResult<Json<serde_json::Value>> {
    let request_id = create_request(&db_pool, body).await?;
    Ok(Json(json!({ "message": "Request sent", "requestId": request_id })))
}

#[debug_handler]
pub async fn requests(
    Path(user_id): Path<Id>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<PendingRequest>>> {
    Ok(Json(list_pending_for_teacher(&db_pool, user_id).await?))
}

#[debug_handler]
pub async fn update_status(
    Path(request_id): Path<Id>,
    State(db_pool): State<SqlitePool>,
    Json(StatusBody { status }): Json<StatusBody>,
) -> AppResult<Json<serde_json::Value>> {
    let status = set_status(&db_pool, request_id, status).await?;
    Ok(Json(json!({ "message": format!("Request {status}") })))
}
