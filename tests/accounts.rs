mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{get, post, register, test_app};

#[tokio::test]
async fn register_returns_the_new_user() {
    let (app, _) = test_app().await;

    let (status, json) = post(
        &app,
        "/api/register",
        json!({ "username": "alice", "email": "alice@x.com", "password": "pw" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["user"]["username"], "alice");
    assert_eq!(json["user"]["email"], "alice@x.com");
    assert!(json["user"]["id"].as_i64().is_some());
    assert!(json["user"].get("password").is_none());
}

#[tokio::test]
async fn register_requires_every_field() {
    let (app, _) = test_app().await;

    let (status, json) = post(&app, "/api/register", json!({ "username": "alice", "email": "" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please provide all fields");
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let (app, _) = test_app().await;
    register(&app, "alice").await;

    let (status, json) = post(
        &app,
        "/api/register",
        json!({ "username": "other", "email": "alice@x.com", "password": "pw" }),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "Email already exists");
}

#[tokio::test]
async fn login_by_email_or_username() {
    let (app, _) = test_app().await;
    let id = register(&app, "alice").await;

    for login in ["alice", "alice@x.com"] {
        let (status, json) = post(&app, "/api/login", json!({ "login": login, "password": "secret" })).await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["message"], "Login successful");
        assert_eq!(json["user"]["id"], id);
    }
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let (app, _) = test_app().await;
    register(&app, "alice").await;

    let (status, _) = post(&app, "/api/login", json!({ "login": "alice", "password": "nope" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/api/login", json!({ "login": "bob", "password": "secret" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, json) = post(&app, "/api/login", json!({ "login": "alice" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "Please provide login details");
}

#[tokio::test]
async fn profile_round_trips_lists_in_order() {
    let (app, _) = test_app().await;
    let id = register(&app, "alice").await;

    let (status, json) = post(
        &app,
        "/api/profile",
        json!({
            "userId": id.to_string(),
            "educationLevel": "University",
            "teachSubjects": ["Math", "Art"],
            "languages": ["English", "Hindi"],
            "proficiencyTest": { "score": 8, "passed": true },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["message"], "Profile created");

    let (status, json) = get(&app, &format!("/api/profile/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["user_id"], id);
    assert_eq!(json["educationLevel"], "University");
    assert_eq!(json["teachSubjects"], json!(["Math", "Art"]));
    assert_eq!(json["learnSubjects"], json!([]));
    assert_eq!(json["languages"], json!(["English", "Hindi"]));
    assert_eq!(json["proficiencyTest"]["passed"], true);
}

#[tokio::test]
async fn second_save_updates_the_profile() {
    let (app, _) = test_app().await;
    let id = register(&app, "alice").await;

    post(&app, "/api/profile", json!({ "userId": id, "teachSubjects": ["Math"] })).await;
    let (_, json) = post(&app, "/api/profile", json!({ "userId": id, "learnSubjects": ["Chess"] })).await;
    assert_eq!(json["message"], "Profile updated");

    let (_, json) = get(&app, &format!("/api/profile/{id}")).await;
    assert_eq!(json["teachSubjects"], json!([]));
    assert_eq!(json["learnSubjects"], json!(["Chess"]));
    assert_eq!(json["proficiencyTest"], json!(null));
}

#[tokio::test]
async fn missing_profile_is_an_empty_object() {
    let (app, _) = test_app().await;
    let id = register(&app, "alice").await;

    let (status, json) = get(&app, &format!("/api/profile/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({}));

    let (status, _) = get(&app, "/api/profile/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_save_checks_the_user() {
    let (app, _) = test_app().await;

    let (status, _) = post(&app, "/api/profile", json!({ "teachSubjects": ["Math"] })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/api/profile", json!({ "userId": 999, "teachSubjects": ["Math"] })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_stored_blobs_read_as_defaults() {
    let (app, db_pool) = test_app().await;
    let id = register(&app, "alice").await;

    sqlx::query("INSERT INTO profiles (user_id, teachSubjects, languages, proficiencyTest) VALUES (?, '[oops', NULL, '{bad')")
        .bind(id)
        .execute(&db_pool)
        .await
        .unwrap();

    let (status, json) = get(&app, &format!("/api/profile/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["teachSubjects"], json!([]));
    assert_eq!(json["languages"], json!([]));
    assert_eq!(json["proficiencyTest"], json!(null));
}

#[tokio::test]
async fn teachers_lists_only_eligible_others() {
    let (app, _) = test_app().await;
    let me = register(&app, "me").await;
    let passed = register(&app, "pat").await;
    let scored = register(&app, "sam").await;
    let failed = register(&app, "fay").await;
    let untested = register(&app, "uma").await;

    let profiles = [
        (me, json!({ "score": 9, "passed": true })),
        (passed, json!({ "score": 3, "passed": true })),
        (scored, json!({ "score": 7, "passed": false })),
        (failed, json!({ "score": 6, "passed": false })),
        (untested, json!(null)),
    ];
    for (id, test) in profiles {
        post(
            &app,
            "/api/profile",
            json!({ "userId": id, "teachSubjects": ["Math"], "proficiencyTest": test }),
        )
        .await;
    }

    let (status, json) = get(&app, &format!("/api/teachers?currentUserId={me}")).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![passed, scored]);
}

#[tokio::test]
async fn teacher_cards_carry_display_fields() {
    let (app, _) = test_app().await;
    let id = register(&app, "pat").await;
    post(
        &app,
        "/api/profile",
        json!({
            "userId": id,
            "educationLevel": "College",
            "teachSubjects": ["Math", "Art"],
            "proficiencyTest": { "score": 9, "passed": true },
        }),
    )
    .await;

    let (_, json) = get(&app, "/api/teachers").await;
    let card = &json[0];
    assert_eq!(card["name"], "pat");
    assert_eq!(card["title"], "College Student");
    assert_eq!(card["subjects"], json!(["Math", "Art"]));
    assert_eq!(card["language"], "English");
    assert_eq!(card["avatarLetter"], "P");
    assert_eq!(card["ratingCount"], 0);
    assert_eq!(card["isReal"], true);
    assert_eq!(card["isEligible"], true);
}

#[tokio::test]
async fn passed_test_without_a_score_still_qualifies() {
    let (app, _) = test_app().await;
    let id = register(&app, "pat").await;

    let (status, json) = post(
        &app,
        "/api/profile",
        json!({
            "userId": id,
            "teachSubjects": ["Math"],
            "proficiencyTest": { "score": null, "passed": true },
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{json}");

    let (_, json) = get(&app, "/api/teachers").await;
    assert_eq!(json[0]["id"], id);
    assert_eq!(json[0]["isEligible"], true);
}
