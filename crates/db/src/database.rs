//! Pooled database handle and the transaction wrapper.

use futures::future::BoxFuture;
use sqlx::{PgConnection, Postgres, Transaction};

use crate::error::DbError;
use crate::DbPool;

/// Future returned by a transaction callback.
pub type TxFuture<'c, T, E> = BoxFuture<'c, Result<T, E>>;

/// Shared handle over the connection pool.
///
/// Cheap to clone: the pool is reference counted internally.
#[derive(Debug, Clone)]
pub struct Database {
    pool: DbPool,
}

/// A connection bound to an open transaction.
///
/// Only query access is exposed. There is no way to begin another
/// transaction from here, so nesting is rejected at compile time.
pub struct TxConnection {
    tx: Transaction<'static, Postgres>,
}

impl TxConnection {
    pub(crate) fn conn(&mut self) -> &mut PgConnection {
        &mut self.tx
    }
}

impl Database {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// `true` if the server answers a trivial query.
    pub async fn is_connection_working(&self) -> bool {
        match sqlx::query("SELECT NOW()").execute(&self.pool).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database connection check failed");
                false
            }
        }
    }

    /// Close every pooled connection. Further queries fail.
    pub async fn disconnect(&self) {
        self.pool.close().await;
        tracing::info!("Database disconnected");
    }

    /// Run `f` inside a transaction on a single pooled connection.
    ///
    /// Commits when `f` succeeds. When `f` or the commit fails, the
    /// transaction is rolled back and the original error is returned; a
    /// failed rollback is only logged. The connection goes back to the pool
    /// on every path, since `TxConnection` owns it and is dropped here.
    pub async fn begin_tx<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send,
        E: From<DbError> + Send,
        F: for<'c> FnOnce(&'c mut TxConnection) -> TxFuture<'c, T, E> + Send,
    {
        let tx = self.pool.begin().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to begin transaction");
            DbError::from(e)
        })?;
        let mut cx = TxConnection { tx };

        match f(&mut cx).await {
            Ok(value) => {
                // A failed COMMIT leaves the transaction open; dropping it
                // queues the ROLLBACK before the connection is released.
                cx.tx.commit().await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to commit transaction");
                    DbError::from(e)
                })?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = cx.tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Error while rolling back transaction");
                } else {
                    tracing::debug!("Transaction rolled back");
                }
                Err(err)
            }
        }
    }
}
