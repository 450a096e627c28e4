//! In-memory implementation of [`DutyDao`] used by tests.
//!
//! Rows live in insertion order, which stands in for `created_at`. A
//! transaction holds the store lock for its whole duration and works on a
//! staged copy that replaces the store only on commit.

use std::sync::Arc;

use async_trait::async_trait;
use duties_core::duty::Duty;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::database::TxFuture;
use crate::error::{DbError, DbResult};
use crate::repositories::{CommonDao, DutyDao};

/// Ephemeral duty store. Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct MemoryDutyDao {
    store: Arc<Mutex<Vec<Duty>>>,
}

/// Transaction-scoped view of a [`MemoryDutyDao`].
///
/// Operations passed this connection must not also go through the pool
/// path (`cx = None`) of the same DAO: the lock is already held.
pub struct MemoryTx {
    guard: OwnedMutexGuard<Vec<Duty>>,
    staged: Vec<Duty>,
}

impl MemoryDutyDao {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `duties`, oldest first.
    pub fn with_duties(duties: Vec<Duty>) -> Self {
        Self {
            store: Arc::new(Mutex::new(duties)),
        }
    }

    /// Copy of every stored row, oldest first.
    pub async fn snapshot(&self) -> Vec<Duty> {
        self.store.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.store.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.is_empty()
    }
}

fn page(rows: &[Duty], offset: i64, limit: i64) -> Vec<Duty> {
    let skip = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
    let rows = rows.iter().skip(skip).cloned();
    match usize::try_from(limit) {
        Ok(take) if take > 0 => rows.take(take).collect(),
        _ => rows.collect(),
    }
}

fn find(rows: &[Duty], id: &str) -> Option<Duty> {
    rows.iter().find(|d| d.id == id).cloned()
}

fn rename(rows: &mut [Duty], duty: &Duty) -> u64 {
    match rows.iter_mut().find(|d| d.id == duty.id) {
        Some(row) => {
            row.name.clone_from(&duty.name);
            1
        }
        None => 0,
    }
}

fn remove(rows: &mut Vec<Duty>, id: &str) -> u64 {
    let before = rows.len();
    rows.retain(|d| d.id != id);
    (before - rows.len()) as u64
}

#[async_trait]
impl CommonDao for MemoryDutyDao {
    type Tx = MemoryTx;

    async fn begin_tx<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send,
        E: From<DbError> + Send,
        F: for<'c> FnOnce(&'c mut Self::Tx) -> TxFuture<'c, T, E> + Send,
    {
        let guard = Arc::clone(&self.store).lock_owned().await;
        let staged = (*guard).clone();
        let mut tx = MemoryTx { guard, staged };

        let value = f(&mut tx).await?;
        let MemoryTx { mut guard, staged } = tx;
        *guard = staged;
        Ok(value)
    }

    async fn is_connection_working(&self) -> bool {
        true
    }
}

#[async_trait]
impl DutyDao for MemoryDutyDao {
    async fn get_duties(
        &self,
        offset: i64,
        limit: i64,
        cx: Option<&mut MemoryTx>,
    ) -> DbResult<Vec<Duty>> {
        Ok(match cx {
            Some(tx) => page(&tx.staged, offset, limit),
            None => page(&*self.store.lock().await, offset, limit),
        })
    }

    async fn get_duty(&self, id: &str, cx: Option<&mut MemoryTx>) -> DbResult<Option<Duty>> {
        Ok(match cx {
            Some(tx) => find(&tx.staged, id),
            None => find(&*self.store.lock().await, id),
        })
    }

    async fn insert_duty(&self, duty: &Duty, cx: Option<&mut MemoryTx>) -> DbResult<()> {
        match cx {
            Some(tx) => tx.staged.push(duty.clone()),
            None => self.store.lock().await.push(duty.clone()),
        }
        Ok(())
    }

    async fn update_duty(&self, duty: &Duty, cx: Option<&mut MemoryTx>) -> DbResult<u64> {
        Ok(match cx {
            Some(tx) => rename(&mut tx.staged, duty),
            None => rename(&mut *self.store.lock().await, duty),
        })
    }

    async fn delete_duty(&self, id: &str, cx: Option<&mut MemoryTx>) -> DbResult<u64> {
        Ok(match cx {
            Some(tx) => remove(&mut tx.staged, id),
            None => remove(&mut *self.store.lock().await, id),
        })
    }
}
