use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, de::Error};

/// Deserializes an optional string, trimming it and treating blank input as absent.
///
/// Request DTOs use this together with `#[serde(default)]` so that a missing field,
/// `null` and `"   "` all reach validation as `None`.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Like [`deserialize_trimmed`] but keeps the value untouched. Used for passwords.
pub fn deserialize_non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.trim().is_empty()))
}

/// Deserializes an optional calendar date.
///
/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (the date part is kept).
/// Blank input is treated as absent.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = deserialize_trimmed(deserializer)? else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| Some(dt.date_naive()))
        .map_err(|_| D::Error::custom(format!("invalid date '{}', expected YYYY-MM-DD", raw)))
}
