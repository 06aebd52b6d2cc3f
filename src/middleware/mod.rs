//! Extractors for authentication and role checks.
//!
//! - [`auth`]: bearer token extractors and the role extractor macro
//! - [`role`]: role checking helpers
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` extractor validates the JWT and extracts claims
//! 3. Role extractors (`RequireAdmin`, `RequireLibraryStaff`, ...) check the role
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::{AuthUser, RequireLibraryStaff};
//!
//! // Any valid token
//! async fn checkout(auth_user: AuthUser) -> impl IntoResponse { /* ... */ }
//!
//! // Admins and librarians only
//! async fn create_book(RequireLibraryStaff(auth_user): RequireLibraryStaff) -> impl IntoResponse {
//!     /* ... */
//! }
//! ```

pub mod auth;
pub mod role;
