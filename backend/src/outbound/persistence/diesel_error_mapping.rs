//! Shared Diesel error classification for the repositories.
//!
//! Repositories care about four outcomes: a unique violation (with the
//! constraint that fired), a foreign key violation, a lost connection, and
//! everything else. Each repository maps these onto its own port error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Unique index guarding the one-open-reception-per-pickup-point rule.
pub(crate) const ONE_OPEN_RECEPTION_CONSTRAINT: &str = "receptions_one_open_per_pvz";

/// Classified Diesel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DieselFailure {
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation,
    /// The connection dropped mid-operation.
    Connection(String),
    /// Any other query failure.
    Query(String),
}

impl DieselFailure {
    /// Whether this is a unique violation raised by `constraint`.
    pub(crate) fn is_unique_violation_of(&self, constraint: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(name) } if name == constraint
        )
    }
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, emitting debug context.
pub(crate) fn classify(error: DieselError, operation: &str) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), %operation, "diesel operation failed");
        }
        _ => debug!(error = %error, %operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::ForeignKeyViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DieselFailure::Connection(info.message().to_owned())
        }
        DieselError::BrokenTransactionManager => {
            DieselFailure::Connection("transaction manager broken".to_owned())
        }
        other => DieselFailure::Query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::DatabaseErrorInformation;
    use rstest::rstest;

    use super::*;

    struct ConstraintInfo(&'static str);

    impl DatabaseErrorInformation for ConstraintInfo {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            Some("receptions")
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            Some(self.0)
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        info: impl DatabaseErrorInformation + Send + Sync + 'static,
    ) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(info))
    }

    #[rstest]
    fn unique_violation_keeps_constraint_name() {
        let failure = classify(
            database_error(
                DatabaseErrorKind::UniqueViolation,
                ConstraintInfo(ONE_OPEN_RECEPTION_CONSTRAINT),
            ),
            "insert reception",
        );
        assert!(failure.is_unique_violation_of(ONE_OPEN_RECEPTION_CONSTRAINT));
        assert!(!failure.is_unique_violation_of("users_email_key"));
    }

    #[rstest]
    fn foreign_key_violation_is_recognised() {
        let failure = classify(
            database_error(
                DatabaseErrorKind::ForeignKeyViolation,
                "insert or update violates foreign key constraint".to_owned(),
            ),
            "insert reception",
        );
        assert_eq!(failure, DieselFailure::ForeignKeyViolation);
    }

    #[rstest]
    fn closed_connection_is_a_connection_failure() {
        let failure = classify(
            database_error(DatabaseErrorKind::ClosedConnection, "server closed".to_owned()),
            "select",
        );
        assert_eq!(failure, DieselFailure::Connection("server closed".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert!(matches!(
            classify(DieselError::NotFound, "select"),
            DieselFailure::Query(_)
        ));
    }

    #[rstest]
    fn pool_errors_yield_their_message() {
        assert_eq!(
            pool_error_message(PoolError::checkout("timed out")),
            "timed out"
        );
    }
}
