use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Request, rejection::JsonRejection},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use eduzone_core::AppError;

/// Fields that failed a `required` rule, in field order.
fn missing_fields(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .iter()
        .filter(|(_, errors)| errors.iter().any(|error| error.code == "required"))
        .map(|(field, _)| field.to_string())
        .collect()
}

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>();
    messages.sort();
    messages.join(", ")
}

/// Maps validation failures onto the error envelope.
///
/// Absent or blank required fields win: the response lists exactly those fields.
/// Otherwise the individual rule messages are joined.
pub fn validation_error(errors: &ValidationErrors) -> AppError {
    let missing = missing_fields(errors);
    if !missing.is_empty() {
        return AppError::missing_fields(missing);
    }

    AppError::bad_request(anyhow!("{}", format_errors(errors)))
}

/// Validates `dto` and converts it into its domain form.
///
/// `convert` only fails on fields that validation reports, so the fallback error is
/// never seen by well-formed callers.
pub fn validated<T, U>(dto: T, convert: impl FnOnce(T) -> Option<U>) -> Result<U, AppError>
where
    T: Validate,
{
    dto.validate().map_err(|errors| validation_error(&errors))?;
    convert(dto).ok_or_else(|| AppError::bad_request(anyhow!("Invalid request body")))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(anyhow!(
                        "Missing 'Content-Type: application/json' header"
                    ));
                }

                let error_msg = rejection.body_text();

                if error_msg.contains("invalid type") || error_msg.contains("unknown variant") {
                    return AppError::bad_request(anyhow!("Invalid field type in request"));
                }

                if error_msg.contains("invalid date") {
                    return AppError::bad_request(anyhow!(
                        "Invalid date, expected YYYY-MM-DD"
                    ));
                }

                AppError::bad_request(anyhow!("Invalid request body"))
            })?;

        value.validate().map_err(|errors| validation_error(&errors))?;

        Ok(ValidatedJson(value))
    }
}

/// Numeric `:id` path segment. Anything that is not an integer is a 400.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathId(pub i64);

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!("Invalid id")))?;

        Ok(PathId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use validator::ValidationError;

    #[test]
    fn test_required_errors_become_missing_fields() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new("required"));
        errors.add("email", ValidationError::new("email"));
        errors.add("author", ValidationError::new("required"));

        let err = validation_error(&errors);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.fields, vec!["author".to_string(), "title".to_string()]);
        assert_eq!(err.error.to_string(), "Missing required fields: author, title");
    }

    #[test]
    fn test_other_errors_use_rule_messages() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "password",
            ValidationError::new("length").with_message("Password must be at least 6 characters".into()),
        );

        let err = validation_error(&errors);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert!(err.fields.is_empty());
        assert_eq!(err.error.to_string(), "Password must be at least 6 characters");
    }
}
