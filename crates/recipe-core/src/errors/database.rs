// ABOUTME: Classification of sqlx errors into application error codes
// ABOUTME: Separates constraint violations, lock contention and unreachable storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};

// SQLite primary result codes; extended codes keep the primary code in the low byte.
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;
const SQLITE_CONSTRAINT: i32 = 19;

impl AppError {
    /// Wrap a `sqlx` failure with the operation that produced it
    ///
    /// Constraint violations become [`ErrorCode::IntegrityViolation`], busy or
    /// locked databases [`ErrorCode::ResourceLocked`], pool and I/O failures
    /// [`ErrorCode::StorageUnavailable`]; everything else is a plain
    /// [`ErrorCode::DatabaseError`].
    pub fn from_sqlx(operation: &str, error: sqlx::Error) -> Self {
        let code = classify(&error);
        Self::new(code, format!("{operation}: {error}")).with_source(error)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        Self::from_sqlx("Database operation failed", error)
    }
}

fn classify(error: &sqlx::Error) -> ErrorCode {
    match error {
        sqlx::Error::Database(db_error) => {
            if db_error.is_unique_violation()
                || db_error.is_foreign_key_violation()
                || db_error.is_check_violation()
            {
                return ErrorCode::IntegrityViolation;
            }
            match db_error
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff)
            {
                Some(SQLITE_CONSTRAINT) => ErrorCode::IntegrityViolation,
                Some(SQLITE_BUSY | SQLITE_LOCKED) => ErrorCode::ResourceLocked,
                _ => ErrorCode::DatabaseError,
            }
        }
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => ErrorCode::StorageUnavailable,
        sqlx::Error::RowNotFound => ErrorCode::ResourceNotFound,
        _ => ErrorCode::DatabaseError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_failures_are_unavailable() {
        let error = AppError::from_sqlx("Failed to acquire connection", sqlx::Error::PoolTimedOut);

        assert_eq!(error.code, ErrorCode::StorageUnavailable);
        assert!(error.message.starts_with("Failed to acquire connection"));
        assert!(error.source.is_some());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = AppError::from(sqlx::Error::RowNotFound);
        assert_eq!(error.code, ErrorCode::ResourceNotFound);
    }
}
