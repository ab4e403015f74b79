use axum::{debug_handler, extract::State};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::{extract::{Json, Query}, ids, AppResult, Id};

use super::{codec, eligibility};

#[derive(Debug, Default, Deserialize)]
pub struct TeachersQuery {
    #[serde(rename = "currentUserId", default, deserialize_with = "ids::flexible")]
    pub current_user_id: Option<Id>,
}

/// A teacher as shown on the learn page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherCard {
    pub id: Id,
    pub name: String,
    pub title: String,
    pub subjects: Vec<String>,
    pub rating: u32,
    pub rating_count: u32,
    pub experience: &'static str,
    pub availability: &'static str,
    pub language: String,
    pub students: u32,
    pub avatar_letter: String,
    pub is_real: bool,
    pub is_eligible: bool,
}

#[derive(sqlx::FromRow)]
struct TeacherRow {
    id: Id,
    username: String,
    #[sqlx(rename = "educationLevel")]
    education_level: Option<String>,
    #[sqlx(rename = "teachSubjects")]
    teach_subjects: Option<String>,
    languages: Option<String>,
    #[sqlx(rename = "proficiencyTest")]
    proficiency_test: Option<String>,
}

impl TeacherRow {
    fn into_card(self) -> Option<TeacherCard> {
        let subjects = codec::decode_list("teachSubjects", self.teach_subjects.as_deref());
        let test = codec::decode_test(self.proficiency_test.as_deref());
        if !eligibility::is_eligible(&subjects, test.as_ref()) {
            return None;
        }

        let languages = codec::decode_list("languages", self.languages.as_deref());
        let title = match self.education_level.as_deref() {
            Some(level) if !level.is_empty() => format!("{level} Student"),
            _ => "Community Teacher".to_owned(),
        };
        let language = if languages.is_empty() {
            "English".to_owned()
        } else {
            languages.join(", ")
        };
        let avatar_letter = self
            .username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default();

        Some(TeacherCard {
            id: self.id,
            name: self.username,
            title,
            subjects,
            rating: 0,
            rating_count: 0,
            experience: "New",
            availability: "Flexible",
            language,
            students: 0,
            avatar_letter,
            is_real: true,
            is_eligible: true,
        })
    }
}

/// Eligible teachers, optionally leaving out the user asking.
pub async fn list_teachers(db_pool: &SqlitePool, current_user_id: Option<Id>) -> AppResult<Vec<TeacherCard>> {
    let rows: Vec<TeacherRow> = sqlx::query_as(
        "SELECT u.id, u.username, p.educationLevel, p.teachSubjects, p.languages, p.proficiencyTest
         FROM users u
         JOIN profiles p ON u.id = p.user_id
         WHERE p.teachSubjects IS NOT NULL AND p.teachSubjects != '[]'
           AND (?1 IS NULL OR u.id != ?1)
         ORDER BY u.id",
    )
    .bind(current_user_id)
    .fetch_all(db_pool)
    .await?;

    let candidates = rows.len();
    let teachers: Vec<TeacherCard> = rows.into_iter().filter_map(TeacherRow::into_card).collect();
    tracing::debug!(candidates, eligible = teachers.len(), "listed teachers");

    Ok(teachers)
}

#[debug_handler]
pub async fn teachers(
    Query(TeachersQuery { current_user_id }): Query<TeachersQuery>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Json<Vec<TeacherCard>>> {
    Ok(Json(list_teachers(&db_pool, current_user_id).await?))
}
