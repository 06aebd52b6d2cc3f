use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{api_index, health_check};

pub fn init_system_router() -> Router<AppState> {
    Router::new()
        .route("/", get(api_index))
        .route("/health", get(health_check))
}
