//! # EduZone Client
//!
//! Typed HTTP client for the EduZone API together with the pieces a front end needs
//! around it: a persisted auth session and a route guard.
//!
//! - [`ApiClient`]: bearer token injection, retry with exponential backoff for
//!   idempotent requests, and `{ data }` / `{ error }` envelope normalization
//! - [`store`]: where the token and the signed-in user are persisted
//! - [`Session`]: restore, login and logout on top of the client
//! - [`guard`]: decides whether a route may be shown for the current session
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use eduzone_client::{ApiClient, Session, store::FileTokenStore};
//!
//! let store = Arc::new(FileTokenStore::default_location()?);
//! let client = ApiClient::new("http://localhost:5000/api", store)?;
//! let mut session = Session::new(client);
//!
//! session.restore().await;
//! if !session.is_authenticated() {
//!     session.login("admin@eduzone.com", "Password123").await?;
//! }
//! let books = session.client().list_books().await?;
//! ```

mod client;
mod error;
pub mod guard;
mod resources;
pub mod retry;
mod session;
pub mod store;

pub use client::ApiClient;
pub use error::ClientError;
pub use guard::{GuardDecision, RouteAccess, authorize};
pub use resources::DeleteAck;
pub use retry::RetryPolicy;
pub use session::{Session, SessionState};
pub use store::{FileTokenStore, MemoryTokenStore, PersistedAuth, TokenStore};
