//! # EduZone Models
//!
//! Domain models and DTOs for the EduZone API.
//!
//! Each module holds the stored entity (`FromRow`), the request DTOs (`Validate`) and
//! the plain insert/update inputs handed to the repositories.
//!
//! # Modules
//!
//! - [`users`]: accounts, roles and authentication payloads
//! - [`books`]: library catalogue and loans
//! - [`teachers`]: teacher contact directory
//! - [`staff`]: staff directory built from teacher accounts
//! - [`calendar`]: school calendar events
//! - [`forms`]: downloadable documents
//! - [`feedback`]: feedback submissions and their review status

pub mod books;
pub mod calendar;
pub mod feedback;
pub mod forms;
pub mod staff;
pub mod teachers;
pub mod users;

mod limits;

pub use books::{ActiveLoan, Book, BookChanges, CreateBookDto, Loan, NewBook, UpdateBookDto};
pub use calendar::{CalendarEvent, EventDto, EventFilterParams, NewEvent};
pub use feedback::{CreateFeedbackDto, Feedback, FeedbackStatus, NewFeedback, UpdateFeedbackStatusDto};
pub use forms::{Form, FormChanges, FormDownload, NewForm, UpdateFormDto};
pub use staff::{CreateStaffDto, StaffMember, UpdateStaffDto};
pub use teachers::{NewTeacher, Teacher, TeacherDto};
pub use users::{
    AuthResponse, LoginDto, NewUser, Profile, RegisterDto, UpdateProfileDto, User, UserProfile,
    UserRole, UserUpdate,
};
