//! # EduZone API
//!
//! A REST API built with Rust, Axum, and PostgreSQL for a school portal: library
//! catalogue, teacher and staff directories, school calendar, downloadable forms and
//! a feedback inbox, gated by role (`admin`, `teacher`, `parent`, `librarian`,
//! `student`).
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Auth extractors and role checks
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Register, login, current user
//! │   ├── books/       # Library catalogue, checkout and return
//! │   ├── teachers/    # Teacher contact directory
//! │   ├── staff/       # Staff directory (users with the teacher role)
//! │   ├── calendar/    # School calendar events
//! │   ├── forms/       # Uploaded school forms
//! │   ├── feedback/    # Feedback inbox
//! │   └── system/      # API index, health check, fallback
//! ├── docs.rs           # OpenAPI document
//! ├── logging.rs        # Tracing setup and request logging
//! ├── router.rs         # Main application router
//! ├── state.rs          # Shared application state
//! └── validator.rs      # Validated JSON and path extractors
//! ```
//!
//! Each feature module follows a consistent structure:
//!
//! - `mod.rs`: Module exports
//! - `controller.rs`: HTTP handlers (routes)
//! - `service.rs`: Business logic
//! - `router.rs`: Axum router configuration
//!
//! Entities and DTOs live in the `eduzone-models` crate, persistence behind the
//! repository traits of `eduzone-db`.
//!
//! ## Response envelope
//!
//! Every success body is `{ "data": ... }` and every failure body is
//! `{ "error": { "message": ..., "fields"?: [...] } }`.
//!
//! ## Quick Start
//!
//! ```bash
//! STORAGE_BACKEND=memory JWT_SECRET=change-me-to-something-long cargo run
//! ```
//!
//! With PostgreSQL, set `DATABASE_URL` (or `DB_HOST`, `DB_USER`, `DB_NAME`); migrations
//! run on startup unless `RUN_MIGRATIONS=false`.
//!
//! When the server is running, API documentation is available at:
//!
//! - Swagger UI: `http://localhost:5000/swagger-ui`
//! - Scalar: `http://localhost:5000/scalar`

pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;

// Re-export workspace crates for convenience
pub use eduzone_auth;
pub use eduzone_config;
pub use eduzone_core;
pub use eduzone_db;
pub use eduzone_models;
