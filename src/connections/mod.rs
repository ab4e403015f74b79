mod request;
mod sessions;
mod status;

use axum::{routing::{get, post}, Router};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{AppState, Id};

pub use request::{create_request, list_pending_for_teacher, set_status, swap_status, ConnectBody, PendingRequest};
pub use sessions::{list_accepted_sessions, Session};
pub use status::{ConnectionStatus, IllegalTransition, Transition};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/connect", post(request::connect))
        .route("/requests/{id}", get(request::requests))
        .route("/requests/{id}/status", post(request::update_status))
        .route("/sessions/{user_id}", get(sessions::sessions))
}

/// A stored connection row. `status` is kept as stored text.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Connection {
    pub id: Id,
    pub learner_id: Id,
    pub teacher_id: Id,
    pub subject: Option<String>,
    pub status: String,
    #[serde(serialize_with = "crate::db::rfc3339::serialize")]
    pub created_at: OffsetDateTime,
}
