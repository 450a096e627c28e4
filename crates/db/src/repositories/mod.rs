//! DAO capability traits and their store variants.
//!
//! Every DAO is transactional ([`CommonDao`]) and the duty DAO adds the
//! per-row operations ([`DutyDao`]). Each operation takes an optional
//! transaction-scoped connection: `None` runs on the shared pool, `Some`
//! runs on the transaction's connection.

use async_trait::async_trait;
use duties_core::duty::Duty;

use crate::database::TxFuture;
use crate::error::{DbError, DbResult};

pub mod duty_repo;
pub mod memory_duty_repo;

pub use duty_repo::PgDutyDao;
pub use memory_duty_repo::{MemoryDutyDao, MemoryTx};

/// Capability shared by all DAOs: run work inside a transaction.
#[async_trait]
pub trait CommonDao: Send + Sync + 'static {
    /// Connection handed to transaction callbacks. Query-only.
    type Tx: Send;

    /// Run `f` atomically. See [`Database::begin_tx`](crate::Database::begin_tx)
    /// for commit/rollback semantics.
    async fn begin_tx<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send,
        E: From<DbError> + Send,
        F: for<'c> FnOnce(&'c mut Self::Tx) -> TxFuture<'c, T, E> + Send;

    /// `true` if the backing store is reachable.
    async fn is_connection_working(&self) -> bool;
}

/// Per-row operations on duties. No business validation happens here.
#[async_trait]
pub trait DutyDao: CommonDao {
    /// Duties ordered by creation time. `limit`/`offset` ≤ 0 mean no clause.
    async fn get_duties(
        &self,
        offset: i64,
        limit: i64,
        cx: Option<&mut Self::Tx>,
    ) -> DbResult<Vec<Duty>>;

    /// `None` when no row has this id.
    async fn get_duty(&self, id: &str, cx: Option<&mut Self::Tx>) -> DbResult<Option<Duty>>;

    async fn insert_duty(&self, duty: &Duty, cx: Option<&mut Self::Tx>) -> DbResult<()>;

    /// Rename a duty and bump `updated_at`. Returns the affected row count.
    async fn update_duty(&self, duty: &Duty, cx: Option<&mut Self::Tx>) -> DbResult<u64>;

    /// Returns the affected row count.
    async fn delete_duty(&self, id: &str, cx: Option<&mut Self::Tx>) -> DbResult<u64>;
}
