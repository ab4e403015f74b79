use axum::{debug_handler, extract::State, response::{IntoResponse, Response}};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::SqlitePool;

use crate::{extract::{Json, Path}, ids, AppError, AppResult, Id, Required};

use super::codec::{self, TestResult};

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Id,
    #[sqlx(rename = "educationLevel")]
    education_level: Option<String>,
    #[sqlx(rename = "learnSubjects")]
    learn_subjects: Option<String>,
    #[sqlx(rename = "teachSubjects")]
    teach_subjects: Option<String>,
    languages: Option<String>,
    #[sqlx(rename = "proficiencyTest")]
    proficiency_test: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "user_id")]
    pub user_id: Id,
    pub education_level: Option<String>,
    pub learn_subjects: Vec<String>,
    pub teach_subjects: Vec<String>,
    pub languages: Vec<String>,
    pub proficiency_test: Option<TestResult>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Profile {
            user_id: row.user_id,
            education_level: row.education_level,
            learn_subjects: codec::decode_list("learnSubjects", row.learn_subjects.as_deref()),
            teach_subjects: codec::decode_list("teachSubjects", row.teach_subjects.as_deref()),
            languages: codec::decode_list("languages", row.languages.as_deref()),
            proficiency_test: codec::decode_test(row.proficiency_test.as_deref()),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    #[serde(default, deserialize_with = "ids::flexible")]
    pub user_id: Option<Id>,
    pub education_level: Option<String>,
    pub learn_subjects: Option<Vec<String>>,
    pub teach_subjects: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub proficiency_test: Option<TestResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Created,
    Updated,
}

/// `Ok(None)` when the user exists but has not filled in a profile yet.
pub async fn get_profile(db_pool: &SqlitePool, user_id: Id) -> AppResult<Option<Profile>> {
    if sqlx::query("SELECT 1 FROM users WHERE id=?")
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("User not found".to_owned()));
    }

    let row: Option<ProfileRow> = sqlx::query_as(
        "SELECT user_id,educationLevel,learnSubjects,teachSubjects,languages,proficiencyTest FROM profiles WHERE user_id=?",
    )
    .bind(user_id)
    .fetch_optional(db_pool)
    .await?;

    tracing::debug!(user_id, found = row.is_some(), "profile read");
    Ok(row.map(Profile::from))
}

/// Inserts or replaces the whole profile. Absent lists are stored as `[]` and
/// an absent test result as `null`.
pub async fn upsert_profile(db_pool: &SqlitePool, body: ProfileBody) -> AppResult<Saved> {
    let user_id = body.user_id.required("Missing userId")?;

    let learn = codec::encode_list(&body.learn_subjects.unwrap_or_default());
    let teach = codec::encode_list(&body.teach_subjects.unwrap_or_default());
    let languages = codec::encode_list(&body.languages.unwrap_or_default());
    let test = codec::encode_test(body.proficiency_test.as_ref())?;

    let existed = sqlx::query("SELECT 1 FROM profiles WHERE user_id=?")
        .bind(user_id)
        .fetch_optional(db_pool)
        .await?
        .is_some();

    sqlx::query(
        "INSERT INTO profiles (user_id,educationLevel,learnSubjects,teachSubjects,languages,proficiencyTest) VALUES (?,?,?,?,?,?)
         ON CONFLICT(user_id) DO UPDATE SET
            educationLevel=excluded.educationLevel,
            learnSubjects=excluded.learnSubjects,
            teachSubjects=excluded.teachSubjects,
            languages=excluded.languages,
            proficiencyTest=excluded.proficiencyTest",
    )
    .bind(user_id)
    .bind(body.education_level)
    .bind(learn)
    .bind(teach)
    .bind(languages)
    .bind(test)
    .execute(db_pool)
    .await?;

    let saved = if existed { Saved::Updated } else { Saved::Created };
    tracing::info!(user_id, ?saved, "profile saved");
    Ok(saved)
}

#[debug_handler]
pub async fn profile(
    Path(user_id): Path<Id>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Response> {
    Ok(match get_profile(&db_pool, user_id).await? {
        Some(profile) => Json(profile).into_response(),
        None => Json(json!({})).into_response(),
    })
}

#[debug_handler]
pub async fn save_profile(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<ProfileBody>,
) -> AppResult<Json<serde_json::Value>> {
    let message = match upsert_profile(&db_pool, body).await? {
        Saved::Created => "Profile created",
        Saved::Updated => "Profile updated",
    };

    Ok(Json(json!({ "message": message })))
}
