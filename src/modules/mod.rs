pub mod auth;
pub mod books;
pub mod calendar;
pub mod feedback;
pub mod forms;
pub mod staff;
pub mod system;
pub mod teachers;
