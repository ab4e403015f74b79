pub mod codec;
pub mod eligibility;
mod page;
mod teachers;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use page::{get_profile, upsert_profile, Profile, ProfileBody, Saved};
pub use teachers::{list_teachers, TeacherCard};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/profile", post(page::save_profile))
        .route("/profile/{user_id}", get(page::profile))
        .route("/teachers", get(teachers::teachers))
}
