//! # EduZone Auth
//!
//! Bearer token claims and JWT utilities for the EduZone API.
//!
//! Tokens are HS256-signed and carry `{ id, email, role, iat, exp }`. Expiry is
//! checked with zero leeway.
//!
//! # Example
//!
//! ```ignore
//! use eduzone_auth::{create_access_token, verify_token};
//!
//! let token = create_access_token(user.id, &user.email, user.role, &config.jwt)?;
//! let claims = verify_token(&token, &config.jwt)?;
//! assert_eq!(claims.id, user.id);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
