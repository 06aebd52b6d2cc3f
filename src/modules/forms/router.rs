use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::get,
};

use crate::state::AppState;

use super::controller::{
    delete_form, download_form, get_form, get_forms, update_form, upload_form,
};

/// Headroom for the text parts and multipart framing around the document.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn init_forms_router(upload_max_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(get_forms).post(upload_form))
        .route("/{id}", get(get_form).put(update_form).delete(delete_form))
        .route("/{id}/download", get(download_form))
        .layer(DefaultBodyLimit::max(
            upload_max_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
}
