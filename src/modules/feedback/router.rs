use axum::{
    Router,
    routing::{get, put},
};

use crate::state::AppState;

use super::controller::{
    create_feedback, delete_feedback, get_all_feedback, get_feedback, update_feedback_status,
};

pub fn init_feedback_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_all_feedback).post(create_feedback))
        .route("/{id}", get(get_feedback).delete(delete_feedback))
        .route("/{id}/status", put(update_feedback_status))
}
