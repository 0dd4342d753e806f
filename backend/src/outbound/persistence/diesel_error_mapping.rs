//! Shared Diesel error classification for the repositories.
//!
//! Repositories run their queries inside [`DbPool::run`](super::DbPool::run),
//! collecting pool and Diesel failures into [`PersistenceError`]. Each
//! repository then turns a [`Failure`] into its own port error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Any failure raised while talking to PostgreSQL.
#[derive(Debug, thiserror::Error)]
pub(crate) enum PersistenceError {
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error(transparent)]
    Diesel(#[from] DieselError),
    /// A stored row could not be turned into a domain value.
    #[error("invalid stored row: {0}")]
    InvalidRow(String),
}

/// Port-neutral failure category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Failure {
    Connection(String),
    Query(String),
    Constraint(String),
}

fn classify_diesel(error: DieselError) -> Failure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => Failure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => Failure::Query("database query error".to_owned()),
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::UniqueViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation => Failure::Constraint(
                info.constraint_name()
                    .map_or_else(|| info.message().to_owned(), ToOwned::to_owned),
            ),
            DatabaseErrorKind::ClosedConnection => {
                Failure::Connection("database connection error".to_owned())
            }
            _ => Failure::Query("database error".to_owned()),
        },
        _ => Failure::Query("database error".to_owned()),
    }
}

/// Reduce a persistence error to a port-neutral category.
pub(crate) fn classify(error: PersistenceError) -> Failure {
    match error {
        PersistenceError::Pool(pool) => Failure::Connection(pool.to_string()),
        PersistenceError::Diesel(diesel) => classify_diesel(diesel),
        PersistenceError::InvalidRow(message) => Failure::Query(message),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PoolError::checkout("refused"))]
    #[case(PoolError::Timeout { timeout: Duration::from_secs(5) })]
    fn pool_failures_are_connection_failures(#[case] error: PoolError) {
        assert!(matches!(
            classify(PersistenceError::from(error)),
            Failure::Connection(_)
        ));
    }

    #[rstest]
    fn missing_row_is_query_failure() {
        assert_eq!(
            classify(PersistenceError::from(DieselError::NotFound)),
            Failure::Query("record not found".to_owned())
        );
    }

    #[rstest]
    fn invalid_row_keeps_its_message() {
        assert_eq!(
            classify(PersistenceError::InvalidRow("bad e-mail".to_owned())),
            Failure::Query("bad e-mail".to_owned())
        );
    }
}
