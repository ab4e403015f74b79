use axum::{debug_handler, extract::State, http::StatusCode};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{extract::Json, AppError, AppResult, Required};

use super::{hash_password, AuthResponse, HashCost, UserSummary};

#[derive(Deserialize)]
pub struct RegisterBody {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Creates a user with a bcrypt-hashed password. Emails are unique, usernames are not.
pub async fn register_user(
    db_pool: &SqlitePool,
    hash_cost: HashCost,
    RegisterBody { username, email, password }: RegisterBody,
) -> AppResult<UserSummary> {
    const MISSING: &str = "Please provide all fields";
    let username = username.required(MISSING)?;
    let email = email.required(MISSING)?;
    let password = password.required(MISSING)?;

    let hashed = hash_password(password, hash_cost).await?;

    let id = sqlx::query("INSERT INTO users (username, email, password) VALUES (?, ?, ?)")
        .bind(&username)
        .bind(&email)
        .bind(hashed)
        .execute(db_pool)
        .await
        .map_err(|err| match AppError::from(err) {
            AppError::Conflict(_) => AppError::Conflict("Email already exists".to_owned()),
            other => other,
        })?
        .last_insert_rowid();

    tracing::info!(user_id = id, %username, "registered user");

    Ok(UserSummary { id, username, email })
}

#[debug_handler(state = crate::AppState)]
pub async fn register(
    State(db_pool): State<SqlitePool>,
    State(hash_cost): State<HashCost>,
    Json(body): Json<RegisterBody>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let user = register_user(&db_pool, hash_cost, body).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully",
            user,
        }),
    ))
}
