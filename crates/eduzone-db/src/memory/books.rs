use async_trait::async_trait;
use chrono::Utc;

use eduzone_models::{ActiveLoan, Book, BookChanges, Loan, NewBook};

use super::MemoryDatabase;
use crate::error::StoreError;
use crate::repositories::BookRepository;

pub struct MemoryBookRepository {
    db: MemoryDatabase,
}

impl MemoryBookRepository {
    pub fn new(db: MemoryDatabase) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn list(&self) -> Result<Vec<Book>, StoreError> {
        let mut books = self.db.read().await.books.select(|_| true);
        books.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, StoreError> {
        Ok(self.db.read().await.books.get(id))
    }

    async fn create(&self, book: NewBook) -> Result<Book, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.books.insert_with(|id| Book {
            id,
            title: book.title,
            author: book.author,
            isbn: book.isbn,
            category: book.category,
            quantity: book.quantity,
            available: book.quantity,
            created_at: Utc::now(),
        }))
    }

    async fn update(&self, id: i64, changes: BookChanges) -> Result<Option<Book>, StoreError> {
        let mut tables = self.db.write().await;
        Ok(tables.books.update_where(
            id,
            |_| true,
            |book| {
                book.available = changes.resolve_available(book);
                book.quantity = changes.quantity;
                book.title = changes.title;
                book.author = changes.author;
                book.isbn = changes.isbn;
                book.category = changes.category;
            },
        ))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.db.write().await;
        if tables.books.remove_where(id, |_| true).is_none() {
            return Ok(false);
        }
        tables.loans.remove_all(|loan| loan.book_id == id);
        Ok(true)
    }

    async fn checkout(&self, id: i64, user_id: i64) -> Result<Option<Book>, StoreError> {
        let mut tables = self.db.write().await;
        let Some(book) = tables
            .books
            .update_where(id, |b| b.available > 0, |b| b.available -= 1)
        else {
            return Ok(None);
        };
        tables.loans.insert_with(|loan_id| Loan {
            id: loan_id,
            user_id,
            book_id: id,
            loaned_at: Utc::now(),
            returned_at: None,
        });
        Ok(Some(book))
    }

    async fn return_copy(&self, id: i64, user_id: i64) -> Result<Option<Book>, StoreError> {
        let mut tables = self.db.write().await;
        // Rows come back in id order, so the first is the oldest
        let Some(loan) = tables
            .loans
            .select(|loan| loan.is_open_for(id, user_id))
            .into_iter()
            .next()
        else {
            return Ok(None);
        };
        let Some(book) = tables
            .books
            .update_where(id, |b| b.available < b.quantity, |b| b.available += 1)
        else {
            return Ok(None);
        };
        tables
            .loans
            .update_where(loan.id, |_| true, |loan| loan.returned_at = Some(Utc::now()));
        Ok(Some(book))
    }

    async fn has_open_loan(&self, id: i64, user_id: i64) -> Result<bool, StoreError> {
        Ok(self
            .db
            .read()
            .await
            .loans
            .any(|loan| loan.is_open_for(id, user_id)))
    }

    async fn list_open_loans(&self, user_id: i64) -> Result<Vec<ActiveLoan>, StoreError> {
        let tables = self.db.read().await;
        Ok(tables
            .loans
            .select(|loan| loan.user_id == user_id && loan.returned_at.is_none())
            .into_iter()
            .filter_map(|loan| {
                let book = tables.books.get(loan.book_id)?;
                Some(ActiveLoan {
                    id: loan.id,
                    book_id: book.id,
                    title: book.title,
                    author: book.author,
                    loaned_at: loan.loaned_at,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_book(title: &str, quantity: i32) -> NewBook {
        NewBook {
            title: title.to_string(),
            author: "Author".to_string(),
            isbn: None,
            category: "Fiction".to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn test_new_book_is_fully_available() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        let book = repo.create(new_book("Dune", 3)).await.unwrap();
        assert_eq!((book.quantity, book.available), (3, 3));
    }

    #[tokio::test]
    async fn test_list_sorted_by_title() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        repo.create(new_book("The Hobbit", 1)).await.unwrap();
        repo.create(new_book("1984", 1)).await.unwrap();
        repo.create(new_book("Pride and Prejudice", 1)).await.unwrap();

        let titles: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, vec!["1984", "Pride and Prejudice", "The Hobbit"]);
    }

    #[tokio::test]
    async fn test_stock_bounds() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        let book = repo.create(new_book("Dune", 1)).await.unwrap();

        assert!(repo.return_copy(book.id, 1).await.unwrap().is_none());
        assert_eq!(repo.checkout(book.id, 1).await.unwrap().unwrap().available, 0);
        assert!(repo.checkout(book.id, 1).await.unwrap().is_none());
        assert_eq!(repo.find_by_id(book.id).await.unwrap().unwrap().available, 0);
        assert!(repo.checkout(999, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_return_closes_only_the_borrowers_loan() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        let book = repo.create(new_book("Dune", 2)).await.unwrap();
        let (alice, bob) = (10, 20);

        repo.checkout(book.id, alice).await.unwrap().unwrap();
        assert!(repo.has_open_loan(book.id, alice).await.unwrap());
        assert!(!repo.has_open_loan(book.id, bob).await.unwrap());

        // Bob never borrowed it, nothing moves
        assert!(repo.return_copy(book.id, bob).await.unwrap().is_none());
        assert_eq!(repo.find_by_id(book.id).await.unwrap().unwrap().available, 1);

        let back = repo.return_copy(book.id, alice).await.unwrap().unwrap();
        assert_eq!(back.available, 2);
        assert!(!repo.has_open_loan(book.id, alice).await.unwrap());
        assert!(repo.list_open_loans(alice).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_return_refused_when_shelf_is_full_keeps_the_loan() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        let book = repo.create(new_book("Dune", 2)).await.unwrap();
        repo.checkout(book.id, 1).await.unwrap();

        let restock = BookChanges {
            title: "Dune".into(),
            author: "Author".into(),
            isbn: None,
            category: "Fiction".into(),
            quantity: 2,
            available: Some(2),
        };
        repo.update(book.id, restock).await.unwrap();

        assert!(repo.return_copy(book.id, 1).await.unwrap().is_none());
        assert!(repo.has_open_loan(book.id, 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_open_loans_listed_oldest_first() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        let dune = repo.create(new_book("Dune", 2)).await.unwrap();
        let hobbit = repo.create(new_book("The Hobbit", 1)).await.unwrap();

        repo.checkout(hobbit.id, 5).await.unwrap();
        repo.checkout(dune.id, 5).await.unwrap();
        repo.checkout(dune.id, 6).await.unwrap();

        let loans = repo.list_open_loans(5).await.unwrap();
        let titles: Vec<_> = loans.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "Dune"]);

        assert!(repo.delete(dune.id).await.unwrap());
        assert_eq!(repo.list_open_loans(5).await.unwrap().len(), 1);
        assert!(repo.list_open_loans(6).await.unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_checkouts_never_oversell() {
        let repo = Arc::new(MemoryBookRepository::new(MemoryDatabase::default()));
        let book = repo.create(new_book("Dune", 3)).await.unwrap();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.checkout(book.id, 1).await })
            })
            .collect();

        let mut succeeded = 0;
        for handle in handles {
            if handle.await.unwrap().unwrap().is_some() {
                succeeded += 1;
            }
        }

        assert_eq!(succeeded, 3);
        assert_eq!(repo.find_by_id(book.id).await.unwrap().unwrap().available, 0);
        assert_eq!(repo.list_open_loans(1).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_shifts_availability() {
        let repo = MemoryBookRepository::new(MemoryDatabase::default());
        let book = repo.create(new_book("Dune", 5)).await.unwrap();
        repo.checkout(book.id, 1).await.unwrap();

        let updated = repo
            .update(
                book.id,
                BookChanges {
                    title: "Dune".into(),
                    author: "Frank Herbert".into(),
                    isbn: None,
                    category: "Science Fiction".into(),
                    quantity: 3,
                    available: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!((updated.quantity, updated.available), (3, 2));
        assert_eq!(updated.author, "Frank Herbert");
    }
}
