use axum::{extract::State, http::StatusCode};

use eduzone_core::{ApiResponse, AppError, Deleted};
use eduzone_models::{ActiveLoan, Book, CreateBookDto, UpdateBookDto};

use crate::middleware::auth::{AuthUser, RequireLibraryStaff};
use crate::state::AppState;
use crate::validator::{PathId, ValidatedJson};

use super::service::BookService;

#[utoipa::path(
    get,
    path = "/api/books",
    responses(
        (status = 200, description = "All books ordered by title, wrapped in `data`", body = [Book]),
        (status = 500, description = "Error fetching books")
    ),
    tag = "Books"
)]
pub async fn get_books(State(state): State<AppState>) -> Result<ApiResponse<Vec<Book>>, AppError> {
    let books = BookService::list_books(&state.repos).await?;
    Ok(ApiResponse::new(books))
}

#[utoipa::path(
    get,
    path = "/api/books/{id}",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found")
    ),
    tag = "Books"
)]
pub async fn get_book(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<ApiResponse<Book>, AppError> {
    let book = BookService::get_book(&state.repos, id).await?;
    Ok(ApiResponse::new(book))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 201, description = "Book created, all copies available", body = Book),
        (status = 400, description = "Missing required fields"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or librarian only")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
pub async fn create_book(
    State(state): State<AppState>,
    RequireLibraryStaff(_auth_user): RequireLibraryStaff,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<(StatusCode, ApiResponse<Book>), AppError> {
    let book = BookService::create_book(&state.repos, dto).await?;
    Ok((StatusCode::CREATED, ApiResponse::new(book)))
}

#[utoipa::path(
    put,
    path = "/api/books/{id}",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    request_body = UpdateBookDto,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Missing required fields or availability out of range"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or librarian only"),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
pub async fn update_book(
    State(state): State<AppState>,
    RequireLibraryStaff(_auth_user): RequireLibraryStaff,
    PathId(id): PathId,
    ValidatedJson(dto): ValidatedJson<UpdateBookDto>,
) -> Result<ApiResponse<Book>, AppError> {
    let book = BookService::update_book(&state.repos, id, dto).await?;
    Ok(ApiResponse::new(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted, `{ data: { success: true } }`"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - admin or librarian only"),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
pub async fn delete_book(
    State(state): State<AppState>,
    RequireLibraryStaff(_auth_user): RequireLibraryStaff,
    PathId(id): PathId,
) -> Result<ApiResponse<Deleted>, AppError> {
    BookService::delete_book(&state.repos, id).await?;
    Ok(Deleted::ok())
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/checkout",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "One copy checked out", body = Book),
        (status = 400, description = "Book is not available"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
pub async fn checkout_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathId(id): PathId,
) -> Result<ApiResponse<Book>, AppError> {
    let book = BookService::checkout_book(&state.repos, id, auth_user.user_id()).await?;
    Ok(ApiResponse::new(book))
}

#[utoipa::path(
    post,
    path = "/api/books/{id}/return",
    params(
        ("id" = i64, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "One copy returned", body = Book),
        (status = 400, description = "No active loan for this book, or book is already fully returned"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Book not found")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
pub async fn return_book(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathId(id): PathId,
) -> Result<ApiResponse<Book>, AppError> {
    let book = BookService::return_book(&state.repos, id, auth_user.user_id()).await?;
    Ok(ApiResponse::new(book))
}

#[utoipa::path(
    get,
    path = "/api/books/loans/me",
    responses(
        (status = 200, description = "The caller's open loans, oldest first", body = [ActiveLoan]),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Books",
    security(("bearer_auth" = []))
)]
pub async fn get_my_loans(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<ApiResponse<Vec<ActiveLoan>>, AppError> {
    let loans = BookService::list_loans(&state.repos, auth_user.user_id()).await?;
    Ok(ApiResponse::new(loans))
}
