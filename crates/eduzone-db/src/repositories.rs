//! Repository trait definitions.
//!
//! Each entity has one trait with a PostgreSQL implementation ([`crate::postgres`])
//! and an in-memory implementation ([`crate::memory`]). Mutations that depend on
//! the current row (stock counters, status transitions, unique emails) are atomic
//! in both.

use async_trait::async_trait;

use eduzone_models::{
    ActiveLoan, Book, BookChanges, CalendarEvent, EventFilterParams, Feedback, FeedbackStatus,
    Form, FormChanges, NewBook, NewEvent, NewFeedback, NewForm, NewTeacher, NewUser, Teacher,
    User, UserRole, UserUpdate,
};

use crate::error::StoreError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Users holding `role`, ordered by name.
    async fn list_by_role(&self, role: UserRole) -> Result<Vec<User>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// Lookup by normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with [`StoreError::Conflict`] when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Replaces the editable fields. With `only_role` set, users holding another
    /// role are treated as missing.
    async fn update(
        &self,
        id: i64,
        only_role: Option<UserRole>,
        changes: UserUpdate,
    ) -> Result<Option<User>, StoreError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64, only_role: Option<UserRole>) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books ordered by title.
    async fn list(&self) -> Result<Vec<Book>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>, StoreError>;

    async fn create(&self, book: NewBook) -> Result<Book, StoreError>;

    /// Applies `changes`, resolving availability against the stored row.
    async fn update(&self, id: i64, changes: BookChanges) -> Result<Option<Book>, StoreError>;

    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Takes one copy off the shelf and opens a loan for `user_id`, as one unit.
    /// `None` when the book is missing or has no copy available.
    async fn checkout(&self, id: i64, user_id: i64) -> Result<Option<Book>, StoreError>;

    /// Closes the oldest open loan `user_id` holds on the book and puts the copy
    /// back, as one unit. `None` when the book is missing, the user holds no open
    /// loan on it, or every copy is already on the shelf.
    async fn return_copy(&self, id: i64, user_id: i64) -> Result<Option<Book>, StoreError>;

    async fn has_open_loan(&self, id: i64, user_id: i64) -> Result<bool, StoreError>;

    /// Open loans of `user_id`, oldest first.
    async fn list_open_loans(&self, user_id: i64) -> Result<Vec<ActiveLoan>, StoreError>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    /// All teachers ordered by name.
    async fn list(&self) -> Result<Vec<Teacher>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Teacher>, StoreError>;

    async fn create(&self, teacher: NewTeacher) -> Result<Teacher, StoreError>;

    async fn update(&self, id: i64, teacher: NewTeacher) -> Result<Option<Teacher>, StoreError>;

    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events within the filter's inclusive range, ordered by date.
    async fn list(&self, filter: &EventFilterParams) -> Result<Vec<CalendarEvent>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<CalendarEvent>, StoreError>;

    async fn create(&self, event: NewEvent) -> Result<CalendarEvent, StoreError>;

    async fn update(&self, id: i64, event: NewEvent)
    -> Result<Option<CalendarEvent>, StoreError>;

    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait FormRepository: Send + Sync {
    /// All forms, newest first.
    async fn list(&self) -> Result<Vec<Form>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Form>, StoreError>;

    async fn create(&self, form: NewForm) -> Result<Form, StoreError>;

    async fn update(&self, id: i64, changes: FormChanges) -> Result<Option<Form>, StoreError>;

    /// Returns the removed row so its file can be cleaned up.
    async fn delete(&self, id: i64) -> Result<Option<Form>, StoreError>;

    /// Increments the download counter.
    async fn record_download(&self, id: i64) -> Result<Option<Form>, StoreError>;
}

#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// All feedback, newest first.
    async fn list(&self) -> Result<Vec<Feedback>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Feedback>, StoreError>;

    async fn create(&self, feedback: NewFeedback) -> Result<Feedback, StoreError>;

    /// Moves the record to `status` if the transition is allowed from its current
    /// status. `None` when the record is missing or the transition was refused.
    async fn set_status(
        &self,
        id: i64,
        status: FeedbackStatus,
    ) -> Result<Option<Feedback>, StoreError>;

    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
