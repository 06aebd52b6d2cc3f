//! Column widths shared by the hand-written `Validate` impls.

use validator::{ValidationError, ValidationErrors};

/// Records a `length` error on `field` when `value` is longer than `max` characters.
pub(crate) fn check_max_chars(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    value: Option<&str>,
    max: usize,
) {
    if value.is_some_and(|v| v.chars().count() > max) {
        errors.add(
            field,
            ValidationError::new("length")
                .with_message(format!("{} must be at most {} characters", label, max).into()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_characters_not_bytes() {
        let mut errors = ValidationErrors::new();
        check_max_chars(&mut errors, "type", "Type", Some("été"), 3);
        assert!(errors.is_empty());

        check_max_chars(&mut errors, "type", "Type", Some("abcd"), 3);
        check_max_chars(&mut errors, "title", "Title", None, 3);
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["type"][0].code, "length");
    }
}
