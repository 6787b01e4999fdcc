use thiserror::Error;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error(transparent)]
    Database(sqlx::Error),

    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Classify a sqlx error into a client-safe message naming the entity.
    ///
    /// Constraint violations keep the raw database message in the log only,
    /// since it carries table and constraint names.
    pub fn classify(err: sqlx::Error, entity: &str) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound(format!("{} not found", entity)),
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                match code.as_deref() {
                    Some(UNIQUE_VIOLATION) => {
                        tracing::debug!("Duplicate {}: {}", entity, db.message());
                        StoreError::DuplicateKey(format!("{} already exists", entity))
                    }
                    Some(FOREIGN_KEY_VIOLATION) => {
                        tracing::debug!("Invalid {} reference: {}", entity, db.message());
                        StoreError::InvalidReference(format!("invalid reference for {}", entity))
                    }
                    _ => StoreError::Database(sqlx::Error::Database(db)),
                }
            }
            other => StoreError::Database(other),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::classify(err, "record")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    #[derive(Debug)]
    struct PgViolation {
        code: &'static str,
        message: &'static str,
    }

    impl std::fmt::Display for PgViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.message)
        }
    }

    impl std::error::Error for PgViolation {}

    impl DatabaseError for PgViolation {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            match self.code {
                UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
                FOREIGN_KEY_VIOLATION => ErrorKind::ForeignKeyViolation,
                _ => ErrorKind::Other,
            }
        }
    }

    fn violation(code: &'static str, message: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(PgViolation { code, message }))
    }

    #[test]
    fn unique_violation_hides_constraint_name() {
        let err = StoreError::classify(
            violation(
                UNIQUE_VIOLATION,
                "duplicate key value violates unique constraint \"users_email_key\"",
            ),
            "user",
        );
        match err {
            StoreError::DuplicateKey(msg) => {
                assert_eq!(msg, "user already exists");
                assert!(!msg.contains("users_email_key"));
            }
            other => panic!("expected DuplicateKey, got {:?}", other),
        }
    }

    #[test]
    fn foreign_key_violation_hides_constraint_name() {
        let err = StoreError::classify(
            violation(
                FOREIGN_KEY_VIOLATION,
                "insert or update on table \"recipes\" violates foreign key constraint \"recipes_family_id_fkey\"",
            ),
            "recipe",
        );
        match err {
            StoreError::InvalidReference(msg) => {
                assert_eq!(msg, "invalid reference for recipe");
                assert!(!msg.contains("fkey"));
            }
            other => panic!("expected InvalidReference, got {:?}", other),
        }
    }

    #[test]
    fn other_database_codes_stay_internal() {
        let err = StoreError::classify(violation("42P01", "relation \"users\" does not exist"), "user");
        assert!(matches!(err, StoreError::Database(sqlx::Error::Database(_))));
    }

    #[test]
    fn row_not_found_names_entity() {
        let err = StoreError::classify(sqlx::Error::RowNotFound, "family");
        match err {
            StoreError::NotFound(msg) => assert_eq!(msg, "family not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn other_errors_pass_through() {
        let err = StoreError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, StoreError::Database(sqlx::Error::PoolClosed)));
    }
}
