//! School calendar events.

use chrono::{DateTime, NaiveDate, Utc};
use eduzone_core::serde::{deserialize_optional_date, deserialize_trimmed};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::limits::check_max_chars;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CalendarEvent {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /calendar/events` and `PUT /calendar/events/{id}`.
///
/// The event type is accepted as either `type` or `category`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EventDto {
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_trimmed")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<NaiveDate>,
    #[serde(
        default,
        rename = "type",
        alias = "category",
        deserialize_with = "deserialize_trimmed"
    )]
    pub event_type: Option<String>,
}

// Written by hand so errors are keyed by the wire name `type`.
impl Validate for EventDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.title.is_none() {
            errors.add("title", ValidationError::new("required"));
        }
        if self.date.is_none() {
            errors.add("date", ValidationError::new("required"));
        }
        if self.event_type.is_none() {
            errors.add("type", ValidationError::new("required"));
        }
        check_max_chars(&mut errors, "title", "Title", self.title.as_deref(), 255);
        check_max_chars(&mut errors, "type", "Type", self.event_type.as_deref(), 50);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl EventDto {
    pub fn into_new(self) -> Option<NewEvent> {
        Some(NewEvent {
            title: self.title?,
            description: self.description,
            date: self.date?,
            event_type: self.event_type?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub event_type: String,
}

/// Inclusive date range filter for `GET /calendar/events`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilterParams {
    /// Earliest date (YYYY-MM-DD)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub from: Option<NaiveDate>,
    /// Latest date (YYYY-MM-DD)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub to: Option<NaiveDate>,
}

impl EventFilterParams {
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_alias() {
        let dto: EventDto = serde_json::from_str(
            r#"{"title":"Sports Day","date":"2024-10-05","category":"sports"}"#,
        )
        .unwrap();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.event_type.as_deref(), Some("sports"));
    }

    #[test]
    fn test_missing_type_keyed_by_wire_name() {
        let dto: EventDto = serde_json::from_str(r#"{"title":"Sports Day"}"#).unwrap();
        let errors = dto.validate().unwrap_err();
        let mut fields: Vec<_> = errors.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        assert_eq!(fields, vec!["date", "type"]);
    }

    #[test]
    fn test_type_wider_than_column_rejected() {
        let dto = EventDto {
            title: Some("Sports Day".into()),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 10, 5),
            event_type: Some("s".repeat(51)),
        };
        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields["type"][0].message.as_deref(),
            Some("Type must be at most 50 characters")
        );
    }

    #[test]
    fn test_event_serializes_type() {
        let event = CalendarEvent {
            id: 1,
            title: "Parent-Teacher Conference".into(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 11, 14).unwrap(),
            event_type: "meeting".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json["type"], "meeting");
        assert_eq!(json["date"], "2024-11-14");
    }

    #[test]
    fn test_range_filter_is_inclusive() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 9, d).unwrap();
        let filter = EventFilterParams {
            from: Some(day(2)),
            to: Some(day(5)),
        };
        assert!(filter.matches(day(2)));
        assert!(filter.matches(day(5)));
        assert!(!filter.matches(day(6)));
        assert!(EventFilterParams::default().matches(day(30)));
    }
}
