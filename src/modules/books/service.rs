use anyhow::{Context, anyhow};
use tracing::{debug, info, instrument, warn};

use eduzone_core::AppError;
use eduzone_db::Repositories;
use eduzone_models::{ActiveLoan, Book, CreateBookDto, UpdateBookDto};

use crate::validator::validated;

pub struct BookService;

fn not_found() -> AppError {
    AppError::not_found(anyhow!("Book not found"))
}

impl BookService {
    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "books"))]
    pub async fn list_books(repos: &Repositories) -> Result<Vec<Book>, AppError> {
        let books = repos.books.list().await.context("Error fetching books")?;
        debug!(count = books.len(), "Fetched books");
        Ok(books)
    }

    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "books"))]
    pub async fn get_book(repos: &Repositories, id: i64) -> Result<Book, AppError> {
        repos
            .books
            .find_by_id(id)
            .await
            .context("Error fetching book")?
            .ok_or_else(not_found)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "INSERT", db.table = "books"))]
    pub async fn create_book(repos: &Repositories, dto: CreateBookDto) -> Result<Book, AppError> {
        let new_book = validated(dto, CreateBookDto::into_new)?;

        let book = repos
            .books
            .create(new_book)
            .await
            .context("Error creating book")?;

        info!(book.id = book.id, book.title = %book.title, "Book created");
        Ok(book)
    }

    #[instrument(skip(repos, dto), fields(db.operation = "UPDATE", db.table = "books"))]
    pub async fn update_book(
        repos: &Repositories,
        id: i64,
        dto: UpdateBookDto,
    ) -> Result<Book, AppError> {
        let changes = validated(dto, UpdateBookDto::into_changes)?;

        if let Some(available) = changes.available
            && available > changes.quantity
        {
            return Err(AppError::bad_request(anyhow!(
                "Available copies cannot exceed quantity"
            )));
        }

        let book = repos
            .books
            .update(id, changes)
            .await
            .context("Error updating book")?
            .ok_or_else(not_found)?;

        info!(book.id = book.id, "Book updated");
        Ok(book)
    }

    #[instrument(skip(repos), fields(db.operation = "DELETE", db.table = "books"))]
    pub async fn delete_book(repos: &Repositories, id: i64) -> Result<(), AppError> {
        let deleted = repos
            .books
            .delete(id)
            .await
            .context("Error deleting book")?;

        if !deleted {
            return Err(not_found());
        }

        info!(book.id = id, "Book deleted");
        Ok(())
    }

    /// Takes one copy off the shelf and records the loan against `user_id`. A single
    /// conditional write, so concurrent checkouts can never drive `available` below zero.
    #[instrument(skip(repos), fields(db.operation = "UPDATE", db.table = "books"))]
    pub async fn checkout_book(
        repos: &Repositories,
        id: i64,
        user_id: i64,
    ) -> Result<Book, AppError> {
        if let Some(book) = repos
            .books
            .checkout(id, user_id)
            .await
            .context("Error checking out book")?
        {
            info!(book.id = id, user.id = user_id, available = book.available, "Book checked out");
            return Ok(book);
        }

        // Nothing changed: either the book is gone or no copy is left
        Self::get_book(repos, id).await?;
        warn!(book.id = id, user.id = user_id, "Checkout refused, no copies available");
        Err(AppError::bad_request(anyhow!("Book is not available")))
    }

    /// Returns the copy `user_id` borrowed. Only the borrower can close a loan.
    #[instrument(skip(repos), fields(db.operation = "UPDATE", db.table = "books"))]
    pub async fn return_book(
        repos: &Repositories,
        id: i64,
        user_id: i64,
    ) -> Result<Book, AppError> {
        if let Some(book) = repos
            .books
            .return_copy(id, user_id)
            .await
            .context("Error returning book")?
        {
            info!(book.id = id, user.id = user_id, available = book.available, "Book returned");
            return Ok(book);
        }

        Self::get_book(repos, id).await?;

        let has_loan = repos
            .books
            .has_open_loan(id, user_id)
            .await
            .context("Error returning book")?;
        if !has_loan {
            warn!(book.id = id, user.id = user_id, "Return refused, no open loan");
            return Err(AppError::bad_request(anyhow!("No active loan for this book")));
        }

        warn!(book.id = id, user.id = user_id, "Return refused, all copies on the shelf");
        Err(AppError::bad_request(anyhow!("Book is already fully returned")))
    }

    #[instrument(skip(repos), fields(db.operation = "SELECT", db.table = "loans"))]
    pub async fn list_loans(
        repos: &Repositories,
        user_id: i64,
    ) -> Result<Vec<ActiveLoan>, AppError> {
        let loans = repos
            .books
            .list_open_loans(user_id)
            .await
            .context("Error fetching loans")?;
        debug!(count = loans.len(), user.id = user_id, "Fetched open loans");
        Ok(loans)
    }
}
