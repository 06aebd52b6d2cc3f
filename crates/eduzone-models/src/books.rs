//! Library catalogue models.
//!
//! A book tracks `quantity` copies of which `available` are on the shelf. The
//! store guarantees `0 <= available <= quantity` at all times.
//!
//! Every checkout opens a [`Loan`] for the borrower, and a return closes the
//! borrower's oldest open loan on that book.

use chrono::{DateTime, Utc};
use eduzone_core::serde::deserialize_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub category: String,
    pub quantity: i32,
    pub available: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateBookDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 255, message = "Author must be at most 255 characters"))]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(required, range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
}

impl CreateBookDto {
    /// `None` when a required field is absent.
    pub fn into_new(self) -> Option<NewBook> {
        Some(NewBook {
            title: self.title?,
            author: self.author?,
            isbn: self.isbn,
            category: self.category?,
            quantity: self.quantity?,
        })
    }
}

/// `PUT /books/{id}` payload. Omitting `available` preserves the number of
/// copies currently checked out.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateBookDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 255, message = "Author must be at most 255 characters"))]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 20, message = "ISBN must be at most 20 characters"))]
    pub isbn: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    #[validate(required, range(min = 0, message = "Quantity cannot be negative"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0, message = "Available cannot be negative"))]
    pub available: Option<i32>,
}

impl UpdateBookDto {
    pub fn into_changes(self) -> Option<BookChanges> {
        Some(BookChanges {
            title: self.title?,
            author: self.author?,
            isbn: self.isbn,
            category: self.category?,
            quantity: self.quantity?,
            available: self.available,
        })
    }
}

/// A new book starts with every copy available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub category: String,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChanges {
    pub title: String,
    pub author: String,
    pub isbn: Option<String>,
    pub category: String,
    pub quantity: i32,
    pub available: Option<i32>,
}

impl BookChanges {
    /// The availability a book ends up with after this change is applied to `current`.
    ///
    /// An explicit value wins. Otherwise the checked-out count is kept and the
    /// result clamped to `[0, quantity]`.
    pub fn resolve_available(&self, current: &Book) -> i32 {
        match self.available {
            Some(available) => available,
            None => {
                let shifted = current.available + (self.quantity - current.quantity);
                shifted.clamp(0, self.quantity)
            }
        }
    }
}

/// One copy handed to one user. Open while `returned_at` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i64,
    pub user_id: i64,
    pub book_id: i64,
    pub loaned_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
}

impl Loan {
    pub fn is_open_for(&self, book_id: i64, user_id: i64) -> bool {
        self.returned_at.is_none() && self.book_id == book_id && self.user_id == user_id
    }
}

/// An open loan joined with the book it is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActiveLoan {
    pub id: i64,
    pub book_id: i64,
    pub title: String,
    pub author: String,
    pub loaned_at: DateTime<Utc>,
}
