pub mod auth;
pub mod config;
pub mod connections;
pub mod db;
pub mod extract;
pub mod ids;
pub mod messages;
pub mod profiles;

use axum::{extract::FromRef, http::StatusCode, response::{IntoResponse, Response}, Json, Router};
use serde_json::json;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use ids::Id;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub hash_cost: auth::HashCost,
}

/// Every route, nested under `/api`, with CORS and request tracing.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(auth::router())
        .merge(profiles::router())
        .merge(messages::router())
        .merge(connections::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Presence checks on incoming request fields.
pub trait Required {
    type Value;
    fn required(self, message: &str) -> AppResult<Self::Value>;
}

impl Required for Option<String> {
    type Value = String;

    fn required(self, message: &str) -> AppResult<String> {
        match self {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(AppError::Validation(message.to_owned())),
        }
    }
}

impl Required for Option<Id> {
    type Value = Id;

    fn required(self, message: &str) -> AppResult<Id> {
        self.ok_or_else(|| AppError::Validation(message.to_owned()))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("storage failure: {0}")]
    Storage(sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                "Server error".to_owned()
            }
            AppError::Internal(err) => {
                tracing::error!(error = ?err, "internal failure");
                "Server error".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return AppError::Conflict(db_err.message().to_owned());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound("Referenced user does not exist".to_owned());
            }
        }
        if matches!(err, sqlx::Error::RowNotFound) {
            return AppError::NotFound("Not found".to_owned());
        }
        AppError::Storage(err)
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(serde_json::Error);
apperr_impl!(bcrypt::BcryptError);
apperr_impl!(tokio::task::JoinError);
