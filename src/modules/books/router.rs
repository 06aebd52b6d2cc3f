use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    checkout_book, create_book, delete_book, get_book, get_books, get_my_loans, return_book,
    update_book,
};

pub fn init_books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_books).post(create_book))
        .route("/loans/me", get(get_my_loans))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .route("/{id}/checkout", post(checkout_book))
        .route("/{id}/return", post(return_book))
}
