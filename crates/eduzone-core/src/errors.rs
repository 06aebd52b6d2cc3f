//! Application error type.
//!
//! Every handler returns `Result<_, AppError>`. The error renders as the uniform
//! error envelope:
//!
//! ```json
//! { "error": { "message": "Missing required fields: title", "fields": ["title"] } }
//! ```
//!
//! Server errors (5xx) never echo the underlying error text to the client. They
//! respond with the outermost `anyhow` context attached by the service layer
//! (e.g. "Error fetching books"), or with "Internal server error" when no context
//! was attached. The full error chain is logged.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    /// Offending request fields, reported for validation failures.
    pub fields: Vec<String>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: Vec::new(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message.into()))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message.into()))
    }

    /// Validation failure listing the required fields that were absent or blank.
    pub fn missing_fields(mut fields: Vec<String>) -> Self {
        fields.sort();
        fields.dedup();
        let message = format!("Missing required fields: {}", fields.join(", "));
        Self {
            status: StatusCode::BAD_REQUEST,
            error: anyhow::anyhow!(message),
            fields,
        }
    }

    /// The message sent to the client.
    pub fn public_message(&self) -> String {
        if !self.status.is_server_error() {
            return self.error.to_string();
        }

        if self.error.chain().count() > 1 {
            self.error.to_string()
        } else {
            "Internal server error".to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status.as_u16(),
                error = %format!("{:#}", self.error),
                "Request failed"
            );
        }

        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(self.public_message()));
        if !self.fields.is_empty() {
            body.insert("fields".to_string(), json!(self.fields));
        }

        (self.status, Json(json!({ "error": body }))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
