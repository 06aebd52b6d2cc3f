//! Feedback submissions.
//!
//! Status moves one way only: `Pending` to `Reviewed`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use eduzone_core::serde::deserialize_trimmed;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::limits::check_max_chars;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "feedback_status", rename_all = "PascalCase")]
pub enum FeedbackStatus {
    #[default]
    Pending,
    Reviewed,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "Pending",
            FeedbackStatus::Reviewed => "Reviewed",
        }
    }

    /// Whether a record in this status may be moved to `next`.
    ///
    /// Staying in place is allowed so that repeated requests are idempotent.
    pub fn can_transition_to(&self, next: FeedbackStatus) -> bool {
        match (self, next) {
            (FeedbackStatus::Pending, _) => true,
            (FeedbackStatus::Reviewed, FeedbackStatus::Reviewed) => true,
            (FeedbackStatus::Reviewed, FeedbackStatus::Pending) => false,
        }
    }
}

impl fmt::Display for FeedbackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FeedbackStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(FeedbackStatus::Pending),
            "reviewed" => Ok(FeedbackStatus::Reviewed),
            _ => Err(format!(
                "Invalid status '{}'. Allowed values: Pending, Reviewed",
                s.trim()
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Feedback {
    pub id: i64,
    #[serde(rename = "type")]
    pub feedback_type: String,
    pub text: String,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateFeedbackDto {
    #[serde(default, rename = "type", deserialize_with = "deserialize_trimmed")]
    pub feedback_type: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub text: Option<String>,
    /// Display name shown to reviewers; defaults to the caller's account name
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub user_name: Option<String>,
}

impl Validate for CreateFeedbackDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.feedback_type.is_none() {
            errors.add("type", ValidationError::new("required"));
        }
        if self.text.is_none() {
            errors.add("text", ValidationError::new("required"));
        }
        check_max_chars(&mut errors, "type", "Type", self.feedback_type.as_deref(), 50);
        check_max_chars(&mut errors, "user_name", "Name", self.user_name.as_deref(), 100);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub feedback_type: String,
    pub text: String,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateFeedbackStatusDto {
    /// `Pending` or `Reviewed`
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    #[validate(required)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parsing() {
        assert_eq!("Reviewed".parse::<FeedbackStatus>(), Ok(FeedbackStatus::Reviewed));
        assert_eq!("pending".parse::<FeedbackStatus>(), Ok(FeedbackStatus::Pending));
        assert!("Archived".parse::<FeedbackStatus>().is_err());
    }

    #[test]
    fn test_transitions() {
        use FeedbackStatus::*;
        assert!(Pending.can_transition_to(Reviewed));
        assert!(Pending.can_transition_to(Pending));
        assert!(Reviewed.can_transition_to(Reviewed));
        assert!(!Reviewed.can_transition_to(Pending));
    }

    #[test]
    fn test_feedback_dto_uses_type_key() {
        let dto: CreateFeedbackDto =
            serde_json::from_str(r#"{"type":"suggestion","text":"  "}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("text"));
    }

    #[test]
    fn test_feedback_type_column_width() {
        let dto = CreateFeedbackDto {
            feedback_type: Some("x".repeat(51)),
            text: Some("Too long a category".into()),
            user_name: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("type"));
    }

    #[test]
    fn test_status_serializes_pascal_case() {
        assert_eq!(serde_json::to_string(&FeedbackStatus::Reviewed).unwrap(), r#""Reviewed""#);
    }
}
