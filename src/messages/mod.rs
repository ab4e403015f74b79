mod conversations;
mod send;
mod thread;

use axum::{routing::{get, post}, Router};

use crate::AppState;

pub use conversations::{list_conversations, Conversation};
pub use send::{send_message, SendBody, SentMessage};
pub use thread::{fetch_thread, ThreadMessage};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", post(send::send))
        .route("/messages/{user_id}/{other_user_id}", get(thread::thread))
        .route("/conversations/{user_id}", get(conversations::conversations))
}
