use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("duplicate value violates unique constraint {}", .constraint.as_deref().unwrap_or("<unknown>"))]
    Conflict { constraint: Option<String> },

    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("database is not configured: {0}")]
    NotConfigured(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::Conflict {
                    constraint: db_err.constraint().map(str::to_string),
                };
            }
        }
        StoreError::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_is_not_a_conflict() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(!err.is_conflict());
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_conflict_message() {
        let err = StoreError::Conflict {
            constraint: Some("users_email_key".into()),
        };
        assert_eq!(
            err.to_string(),
            "duplicate value violates unique constraint users_email_key"
        );
    }
}
