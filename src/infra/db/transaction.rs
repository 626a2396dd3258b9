//! Transaction scope helper.
//!
//! Runs a closure inside one database transaction: commit on `Ok`,
//! rollback on `Err`. Rollback failures are logged and the original error
//! is returned.
//!
//! `is_serialization_failure` tells callers when an aborted transaction
//! lost to a concurrent writer and is safe to run again.

use std::future::Future;
use std::pin::Pin;

use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, IsolationLevel,
    RuntimeErr, TransactionTrait,
};

use crate::errors::{AppError, AppResult};

/// Execute `f` within a read-write transaction at the given isolation level.
pub async fn with_transaction<F, T>(
    db: &DatabaseConnection,
    isolation: IsolationLevel,
    f: F,
) -> AppResult<T>
where
    F: for<'a> FnOnce(
            &'a DatabaseTransaction,
        ) -> Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>
        + Send,
    T: Send,
{
    let txn = db
        .begin_with_config(Some(isolation), Some(AccessMode::ReadWrite))
        .await
        .map_err(AppError::from)?;

    let outcome = f(&txn).await;

    match outcome {
        Ok(result) => {
            txn.commit().await.map_err(AppError::from)?;
            Ok(result)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Transaction rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

/// Whether `err` aborted a transaction because of a concurrent writer.
///
/// Postgres reports serialization failures and deadlocks by SQLSTATE. SQLite
/// reports lock contention as SQLITE_BUSY or SQLITE_LOCKED, possibly as an
/// extended code carrying the primary code in its low byte.
pub fn is_serialization_failure(backend: DbBackend, err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Exec(e) | DbErr::Query(e) | DbErr::Conn(e) => e,
        _ => return false,
    };

    match runtime {
        RuntimeErr::SqlxError(sea_orm::sqlx::Error::Database(db_err)) => db_err
            .code()
            .is_some_and(|code| is_retryable_code(backend, &code)),
        _ => false,
    }
}

fn is_retryable_code(backend: DbBackend, code: &str) -> bool {
    match backend {
        DbBackend::Postgres => matches!(code, "40001" | "40P01"),
        DbBackend::MySql => code == "40001",
        DbBackend::Sqlite => code
            .parse::<i32>()
            .is_ok_and(|code| matches!(code & 0xff, 5 | 6)),
    }
}
