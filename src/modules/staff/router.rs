use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{
    create_staff_member, delete_staff_member, get_staff, get_staff_member, update_staff_member,
};

pub fn init_staff_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_staff).post(create_staff_member))
        .route(
            "/{id}",
            get(get_staff_member)
                .put(update_staff_member)
                .delete(delete_staff_member),
        )
}
