mod login;
mod register;

use axum::{routing::post, Router};
use serde::Serialize;

use crate::{AppResult, AppState, Id};

pub use login::{login, login_user};
pub use register::{register, register_user};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// bcrypt work factor used for new password hashes.
#[derive(Debug, Clone, Copy)]
pub struct HashCost(pub u32);

impl Default for HashCost {
    fn default() -> Self {
        HashCost(bcrypt::DEFAULT_COST)
    }
}

/// The public face of a user, as returned by register and login.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: Id,
    pub username: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub message: &'static str,
    pub user: UserSummary,
}

// both run on the blocking pool
async fn hash_password(password: String, HashCost(cost): HashCost) -> AppResult<String> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??)
}

async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    Ok(tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??)
}
