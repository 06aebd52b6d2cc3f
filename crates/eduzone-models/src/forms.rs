//! Downloadable school documents.

use chrono::{DateTime, Utc};
use eduzone_core::serde::deserialize_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Form {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    /// Public path of the stored document, e.g. `/uploads/forms/...pdf`
    pub file_path: String,
    /// Size in bytes
    pub file_size: i64,
    pub downloads: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewForm {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub file_path: String,
    pub file_size: i64,
}

/// `PUT /forms/{id}` payload. The document itself cannot be replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFormDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 255, message = "Title must be at most 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
}

impl UpdateFormDto {
    pub fn into_changes(self) -> Option<FormChanges> {
        Some(FormChanges {
            title: self.title?,
            description: self.description,
            category: self.category?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormChanges {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

/// Multipart fields of `POST /forms`, documented for OpenAPI.
#[derive(Debug, ToSchema)]
pub struct UploadFormRequest {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FormDownload {
    pub download_url: String,
    pub form: Form,
}
