//! Typed wrappers over the generic verbs.

mod auth;
mod books;

use serde::Deserialize;

/// Body of a successful delete: `{ "success": true }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct DeleteAck {
    pub success: bool,
}
