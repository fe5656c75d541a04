// ABOUTME: Transaction management with RAII guards and retry on lock contention
// ABOUTME: Guarantees all-or-nothing recipe writes and automatic rollback on drop

// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Transaction management with RAII guards and retry patterns
//!
//! - `TransactionGuard`: wraps a `SQLx` transaction and rolls it back unless
//!   `commit()` is reached, so an early `?` or a cancelled request never leaves
//!   a half-written recipe behind
//! - `retry_transaction`: re-runs a whole transaction with exponential backoff
//!   when `SQLite` reports the database as busy or locked
//!
//! ```text
//! retry_transaction(|| async move {
//!     let mut guard = SqliteTransactionGuard::new(pool.begin().await?);
//!     sqlx::query("INSERT INTO recipes ...").execute(guard.executor()?).await?;
//!     sqlx::query("INSERT INTO recipe_ingredients ...").execute(guard.executor()?).await?;
//!     guard.commit().await
//! }, MAX_TRANSACTION_RETRIES).await?;
//! ```

use std::future::Future;
use std::time::Duration;

use sqlx::{Database, Transaction};
use tokio::time::sleep;
use tracing::{debug, error, warn};

use crate::errors::{AppError, AppResult, ErrorCode};

/// Retry a transaction while it fails with lock contention
///
/// Only [`ErrorCode::ResourceLocked`] is retried. Constraint violations,
/// validation failures, missing rows and unreachable storage are returned
/// immediately. Backoff doubles from 20ms.
///
/// # Errors
///
/// Returns the last error once `max_attempts` is reached, or the first
/// non-retryable error
pub async fn retry_transaction<F, Fut, T>(mut f: F, max_attempts: u32) -> AppResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempts = 0;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                attempts += 1;
                if e.code != ErrorCode::ResourceLocked {
                    return Err(e);
                }
                if attempts >= max_attempts {
                    error!(
                        attempts = attempts,
                        error = %e,
                        "Transaction still contended after max attempts"
                    );
                    return Err(e);
                }

                let backoff_ms = 10 * (1_u64 << attempts);
                warn!(
                    attempt = attempts,
                    max_attempts = max_attempts,
                    backoff_ms = backoff_ms,
                    error = %e,
                    "Transaction hit lock contention, retrying after backoff"
                );
                sleep(Duration::from_millis(backoff_ms)).await;
            }
        }
    }
}

/// RAII guard for database transactions ensuring automatic rollback on drop
///
/// If the guard is dropped without `commit()`, `SQLx` rolls the transaction
/// back when the inner `Transaction` is dropped.
pub struct TransactionGuard<'c, DB: Database> {
    transaction: Option<Transaction<'c, DB>>,
}

impl<'c, DB: Database> TransactionGuard<'c, DB> {
    /// Create a new transaction guard from an existing `SQLx` transaction
    #[must_use]
    pub fn new(transaction: Transaction<'c, DB>) -> Self {
        Self {
            transaction: Some(transaction),
        }
    }

    /// Commit the transaction and consume the guard
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction was already consumed or the commit fails
    pub async fn commit(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.commit()
                    .await
                    .map_err(|e| AppError::from_sqlx("Transaction commit failed", e))?;
                debug!("TransactionGuard committed");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot commit",
            )),
        }
    }

    /// Explicitly rollback the transaction and consume the guard
    ///
    /// Used on failed writes so the connection returns to the pool already
    /// rolled back.
    ///
    /// # Errors
    ///
    /// Returns an error if the rollback operation fails
    pub async fn rollback(mut self) -> AppResult<()> {
        match self.transaction.take() {
            Some(tx) => {
                tx.rollback()
                    .await
                    .map_err(|e| AppError::from_sqlx("Transaction rollback failed", e))?;
                debug!("TransactionGuard rolled back explicitly");
                Ok(())
            }
            None => Err(AppError::internal(
                "Transaction already consumed - cannot rollback",
            )),
        }
    }

    /// Get a mutable reference to the underlying connection for executing queries
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction has already been committed or rolled back
    pub fn executor(&mut self) -> AppResult<&mut <DB as Database>::Connection> {
        self.transaction.as_deref_mut().ok_or_else(|| {
            AppError::internal("Transaction already consumed - guard used after commit/rollback")
        })
    }
}

impl<DB: Database> Drop for TransactionGuard<'_, DB> {
    fn drop(&mut self) {
        if self.transaction.is_some() {
            debug!("TransactionGuard dropped without commit - rolling back");
        }
    }
}

/// Type alias for `SQLite` transaction guard
pub type SqliteTransactionGuard<'c> = TransactionGuard<'c, sqlx::Sqlite>;
