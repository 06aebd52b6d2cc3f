//! PostgreSQL repositories.
//!
//! Queries are built at runtime with `query_as` and mapped through `FromRow`.
//! Conditional writes (`... WHERE available > 0 RETURNING *`) keep check-then-act
//! sequences atomic without explicit transactions.

mod books;
mod events;
mod feedback;
mod forms;
mod teachers;
mod users;

pub use books::PgBookRepository;
pub use events::PgEventRepository;
pub use feedback::PgFeedbackRepository;
pub use forms::PgFormRepository;
pub use teachers::PgTeacherRepository;
pub use users::PgUserRepository;
