use eduzone_models::{ActiveLoan, Book, CreateBookDto, UpdateBookDto};

use crate::client::ApiClient;
use crate::error::ClientError;

use super::DeleteAck;

impl ApiClient {
    pub async fn list_books(&self) -> Result<Vec<Book>, ClientError> {
        self.get("/books").await
    }

    pub async fn get_book(&self, id: i64) -> Result<Book, ClientError> {
        self.get(&format!("/books/{}", id)).await
    }

    pub async fn create_book(&self, dto: &CreateBookDto) -> Result<Book, ClientError> {
        self.post("/books", dto).await
    }

    pub async fn update_book(&self, id: i64, dto: &UpdateBookDto) -> Result<Book, ClientError> {
        self.put(&format!("/books/{}", id), dto).await
    }

    pub async fn delete_book(&self, id: i64) -> Result<DeleteAck, ClientError> {
        self.delete(&format!("/books/{}", id)).await
    }

    /// The returned row is authoritative; callers replace their local copy with it.
    pub async fn checkout_book(&self, id: i64) -> Result<Book, ClientError> {
        self.post(&format!("/books/{}/checkout", id), &()).await
    }

    pub async fn return_book(&self, id: i64) -> Result<Book, ClientError> {
        self.post(&format!("/books/{}/return", id), &()).await
    }

    /// Books the signed-in user currently has out.
    pub async fn my_loans(&self) -> Result<Vec<ActiveLoan>, ClientError> {
        self.get("/books/loans/me").await
    }
}
