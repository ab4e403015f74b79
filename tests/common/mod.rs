#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use skillswap::{auth::HashCost, db, AppState, Id};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

/// In-memory database; a single connection that never idles out, so every
/// query sees the same database.
pub async fn test_pool() -> SqlitePool {
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::init::create_tables(&db_pool).await.unwrap();
    db_pool
}

pub async fn test_app() -> (Router, SqlitePool) {
    let db_pool = test_pool().await;
    let app = skillswap::app(AppState {
        db_pool: db_pool.clone(),
        hash_cost: HashCost(4),
    });
    (app, db_pool)
}

pub async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    call(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    call(app, Method::POST, uri, Some(body)).await
}

/// Registers `username` with email `<username>@x.com` and returns the new id.
pub async fn register(app: &Router, username: &str) -> Id {
    let (status, json) = post(
        app,
        "/api/register",
        serde_json::json!({
            "username": username,
            "email": format!("{username}@x.com"),
            "password": "secret",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["user"]["id"].as_i64().unwrap()
}
