//! Teacher contact directory.
//!
//! Independent of user accounts: entries here cannot log in.

use chrono::{DateTime, Utc};
use eduzone_core::serde::deserialize_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub subject: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of both `POST /teachers` and `PUT /teachers/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct TeacherDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required, length(max = 100, message = "Subject must be at most 100 characters"))]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(
        required,
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,
}

impl TeacherDto {
    pub fn into_new(self) -> Option<NewTeacher> {
        Some(NewTeacher {
            name: self.name?,
            subject: self.subject?,
            email: self.email?,
            phone: self.phone,
        })
    }
}

/// Used for inserts and full updates alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTeacher {
    pub name: String,
    pub subject: String,
    pub email: String,
    pub phone: Option<String>,
}
