use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use eduzone_models::{ActiveLoan, Book, BookChanges, NewBook};

use crate::error::StoreError;
use crate::repositories::BookRepository;

pub struct PgBookRepository {
    pool: PgPool,
}

impl PgBookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "books"))]
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY title ASC, id ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "books"))]
    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, StoreError> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    #[instrument(skip(self, book), fields(db.operation = "INSERT", db.table = "books"))]
    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let created = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author, isbn, category, quantity, available)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING *",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(&book.category)
        .bind(book.quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    #[instrument(skip(self, changes), fields(db.operation = "UPDATE", db.table = "books"))]
    async fn update(&self, id: i64, changes: BookChanges) -> Result<Option<Book>, StoreError> {
        // Without an explicit value the checked-out count (quantity - available) is kept
        let updated = sqlx::query_as::<_, Book>(
            "UPDATE books
             SET title = $2, author = $3, isbn = $4, category = $5,
                 available = COALESCE($7, GREATEST(0, LEAST($6, available + ($6 - quantity)))),
                 quantity = $6
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.author)
        .bind(&changes.isbn)
        .bind(&changes.category)
        .bind(changes.quantity)
        .bind(changes.available)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    #[instrument(skip(self), fields(db.operation = "DELETE", db.table = "books"))]
    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "books"))]
    async fn checkout(&self, id: i64, user_id: i64) -> Result<Option<Book>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query_as::<_, Book>(
            "UPDATE books SET available = available - 1
             WHERE id = $1 AND available > 0
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if book.is_some() {
            sqlx::query("INSERT INTO loans (user_id, book_id) VALUES ($1, $2)")
                .bind(user_id)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    #[instrument(skip(self), fields(db.operation = "UPDATE", db.table = "books"))]
    async fn return_copy(&self, id: i64, user_id: i64) -> Result<Option<Book>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let closed = sqlx::query_scalar::<_, i64>(
            "UPDATE loans SET returned_at = NOW()
             WHERE returned_at IS NULL AND id = (
                 SELECT id FROM loans
                 WHERE book_id = $1 AND user_id = $2 AND returned_at IS NULL
                 ORDER BY loaned_at ASC, id ASC
                 LIMIT 1
                 FOR UPDATE
             )
             RETURNING id",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;

        if closed.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let book = sqlx::query_as::<_, Book>(
            "UPDATE books SET available = available + 1
             WHERE id = $1 AND available < quantity
             RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        // The loan stays open unless the copy actually went back
        if book.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        tx.commit().await?;
        Ok(book)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "loans"))]
    async fn has_open_loan(&self, id: i64, user_id: i64) -> Result<bool, StoreError> {
        let open = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                 SELECT 1 FROM loans
                 WHERE book_id = $1 AND user_id = $2 AND returned_at IS NULL
             )",
        )
        .bind(id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(open)
    }

    #[instrument(skip(self), fields(db.operation = "SELECT", db.table = "loans"))]
    async fn list_open_loans(&self, user_id: i64) -> Result<Vec<ActiveLoan>, StoreError> {
        let loans = sqlx::query_as::<_, ActiveLoan>(
            "SELECT l.id, l.book_id, b.title, b.author, l.loaned_at
             FROM loans l
             JOIN books b ON b.id = l.book_id
             WHERE l.user_id = $1 AND l.returned_at IS NULL
             ORDER BY l.loaned_at ASC, l.id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(loans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_book(quantity: i32) -> NewBook {
        NewBook {
            title: "The Hobbit".to_string(),
            author: "J.R.R. Tolkien".to_string(),
            isbn: Some("9780547928227".to_string()),
            category: "Fantasy".to_string(),
            quantity,
        }
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_checkout_stops_at_zero(pool: PgPool) {
        let repo = PgBookRepository::new(pool);
        let book = repo.create(new_book(1)).await.unwrap();

        let after = repo.checkout(book.id, 1).await.unwrap().unwrap();
        assert_eq!(after.available, 0);
        assert!(repo.checkout(book.id, 2).await.unwrap().is_none());

        let back = repo.return_copy(book.id, 1).await.unwrap().unwrap();
        assert_eq!(back.available, 1);
        assert!(repo.return_copy(book.id, 1).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_return_requires_an_open_loan(pool: PgPool) {
        let repo = PgBookRepository::new(pool);
        let book = repo.create(new_book(2)).await.unwrap();
        repo.checkout(book.id, 1).await.unwrap().unwrap();

        assert!(repo.return_copy(book.id, 2).await.unwrap().is_none());
        assert!(!repo.has_open_loan(book.id, 2).await.unwrap());
        assert_eq!(repo.find_by_id(book.id).await.unwrap().unwrap().available, 1);

        let loans = repo.list_open_loans(1).await.unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(loans[0].title, "The Hobbit");

        repo.return_copy(book.id, 1).await.unwrap().unwrap();
        assert!(repo.list_open_loans(1).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_concurrent_checkouts_never_oversell(pool: PgPool) {
        let repo = std::sync::Arc::new(PgBookRepository::new(pool));
        let book = repo.create(new_book(3)).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move { repo.checkout(book.id, 1).await }));
        }

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 3);
        let stored = repo.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(stored.available, 0);
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore = "requires a PostgreSQL database (DATABASE_URL)"]
    async fn test_update_preserves_checked_out_copies(pool: PgPool) {
        let repo = PgBookRepository::new(pool);
        let book = repo.create(new_book(5)).await.unwrap();
        repo.checkout(book.id, 1).await.unwrap();
        repo.checkout(book.id, 2).await.unwrap();

        let changes = BookChanges {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone(),
            category: book.category.clone(),
            quantity: 8,
            available: None,
        };
        let updated = repo.update(book.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.quantity, 8);
        assert_eq!(updated.available, 6);
    }
}
