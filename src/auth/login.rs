use axum::{debug_handler, extract::State};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{extract::Json, AppError, AppResult, Id, Required};

use super::{verify_password, AuthResponse, UserSummary};

#[derive(Deserialize)]
pub struct LoginBody {
    /// Either the email or the username.
    pub login: Option<String>,
    pub password: Option<String>,
}

/// Checks credentials and hands back the user. No token is issued; the client
/// keeps the returned id.
pub async fn login_user(
    db_pool: &SqlitePool,
    LoginBody { login, password }: LoginBody,
) -> AppResult<UserSummary> {
    const MISSING: &str = "Please provide login details";
    let login = login.required(MISSING)?;
    let password = password.required(MISSING)?;

    let Some((id, username, email, hash)): Option<(Id, String, String, String)> =
        sqlx::query_as("SELECT id,username,email,password FROM users WHERE email = ? OR username = ? ORDER BY id LIMIT 1")
            .bind(&login)
            .bind(&login)
            .fetch_optional(db_pool)
            .await?
    else {
        tracing::debug!(%login, "login for unknown user");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, hash).await? {
        tracing::debug!(user_id = id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = id, "login");
    Ok(UserSummary { id, username, email })
}

#[debug_handler]
pub async fn login(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<LoginBody>,
) -> AppResult<Json<AuthResponse>> {
    let user = login_user(&db_pool, body).await?;

    Ok(Json(AuthResponse {
        message: "Login successful",
        user,
    }))
}
