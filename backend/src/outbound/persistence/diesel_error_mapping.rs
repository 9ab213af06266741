//! Shared classification of Diesel and pool failures.
//!
//! Repositories translate a [`StoreFailure`] into their own port error,
//! deciding which unique constraints mean "duplicate" for their table.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::models::CorruptRow;
use super::pool::PoolError;

/// Store failure reduced to the cases repositories distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// A unique constraint rejected the write.
    UniqueViolation { constraint: Option<String> },
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation,
    /// The database could not be reached.
    Connection(String),
    /// Any other query failure.
    Query(String),
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<CorruptRow> for StoreFailure {
    fn from(error: CorruptRow) -> Self {
        Self::Query(error.to_string())
    }
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
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
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                Self::ForeignKeyViolation
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }
}

impl StoreFailure {
    /// Whether this is a unique violation on `constraint`.
    pub(crate) fn violates(&self, constraint: &str) -> bool {
        matches!(
            self,
            Self::UniqueViolation { constraint: Some(name) } if name == constraint
        )
    }

    /// Message for connection/query failures; other cases render a summary.
    pub(crate) fn into_message(self) -> String {
        match self {
            Self::Connection(message) | Self::Query(message) => message,
            Self::UniqueViolation { constraint } => format!(
                "unique constraint violated: {}",
                constraint.as_deref().unwrap_or("unknown")
            ),
            Self::ForeignKeyViolation => "foreign key constraint violated".to_owned(),
        }
    }
}

/// Convert a page offset or limit to the `i64` Diesel expects.
pub(crate) fn to_sql_count(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Convert a `COUNT(*)` result to a page total.
pub(crate) fn from_sql_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let failure = StoreFailure::from(PoolError::checkout("timed out"));
        assert_eq!(failure, StoreFailure::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        let failure = StoreFailure::from(DieselError::NotFound);
        assert_eq!(failure.into_message(), "record not found");
    }

    #[rstest]
    fn violates_matches_only_named_constraint() {
        let failure = StoreFailure::UniqueViolation {
            constraint: Some("users_email_key".to_owned()),
        };
        assert!(failure.violates("users_email_key"));
        assert!(!failure.violates("roles_name_key"));
        assert!(!StoreFailure::ForeignKeyViolation.violates("users_email_key"));
    }

    #[rstest]
    #[case(0, 0)]
    #[case(-3, 0)]
    #[case(42, 42)]
    fn counts_never_go_negative(#[case] raw: i64, #[case] expected: u64) {
        assert_eq!(from_sql_count(raw), expected);
    }
}
