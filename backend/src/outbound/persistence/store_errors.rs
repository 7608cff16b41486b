//! Translation of pool and Diesel failures into driven-port errors.
//!
//! SQL text and driver messages stay in debug logs; callers only ever see
//! fixed strings.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{ExerciseRepositoryError, UserPersistenceError};

use super::pool::PoolError;

/// Port errors that distinguish an unreachable store from a failed
/// statement.
pub(crate) trait StoreError: Sized {
    fn unreachable(message: String) -> Self;
    fn failed(message: String) -> Self;

    fn from_pool(error: PoolError) -> Self {
        Self::unreachable(error.into_message())
    }

    fn from_diesel(error: DieselError) -> Self {
        let message = match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, detail = info.message(), "statement rejected");
                match kind {
                    DatabaseErrorKind::ClosedConnection => {
                        return Self::unreachable("database connection error".to_owned());
                    }
                    _ => "database error",
                }
            }
            DieselError::NotFound => "record not found",
            DieselError::QueryBuilderError(_) => "database query error",
            other => {
                debug!(%other, "statement failed");
                "database error"
            }
        };
        Self::failed(message.to_owned())
    }
}

impl StoreError for UserPersistenceError {
    fn unreachable(message: String) -> Self {
        Self::connection(message)
    }

    fn failed(message: String) -> Self {
        Self::query(message)
    }
}

impl StoreError for ExerciseRepositoryError {
    fn unreachable(message: String) -> Self {
        Self::connection(message)
    }

    fn failed(message: String) -> Self {
        Self::query(message)
    }
}

/// Unique index named by a violation, if that is what `error` is.
pub(crate) fn violated_unique_index(error: &DieselError) -> Option<&str> {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            info.constraint_name()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_failures_mean_the_store_is_unreachable() {
        let error = ExerciseRepositoryError::from_pool(PoolError::checkout("timeout"));
        assert_eq!(error, ExerciseRepositoryError::connection("timeout"));
    }

    #[rstest]
    #[case(DieselError::NotFound, "record not found")]
    #[case(DieselError::RollbackTransaction, "database error")]
    fn statement_failures_hide_driver_text(#[case] error: DieselError, #[case] expected: &str) {
        assert_eq!(
            UserPersistenceError::from_diesel(error),
            UserPersistenceError::query(expected)
        );
    }

    #[rstest]
    fn only_unique_violations_name_an_index() {
        assert_eq!(violated_unique_index(&DieselError::NotFound), None);
    }
}
