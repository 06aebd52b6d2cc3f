//! # EduZone Core
//!
//! Core types, errors, and utilities for the EduZone API.
//!
//! This crate provides foundational types used throughout the EduZone application:
//!
//! - [`errors`]: Application error type with conversion into the `{ error }` envelope
//! - [`response`]: The `{ data }` success envelope
//! - [`password`]: bcrypt password hashing and verification
//! - [`serde`]: Custom serde deserialization helpers for request DTOs
//! - [`file_storage`]: Local file storage for uploaded documents
//!
//! # Example
//!
//! ```ignore
//! use eduzone_core::{ApiResponse, AppError};
//! use eduzone_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Book not found"));
//! let hash = hash_password("secure_password")?;
//! let body = ApiResponse::new(book);
//! ```

pub mod errors;
pub mod file_storage;
pub mod password;
pub mod response;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use password::{hash_password, hash_password_with_cost, verify_password};
pub use response::{ApiResponse, Deleted};
