//! PostgreSQL implementation of [`DutyDao`].

use std::fmt::Write;

use async_trait::async_trait;
use duties_core::duty::Duty;

use crate::database::{Database, TxConnection, TxFuture};
use crate::error::{DbError, DbResult};
use crate::models::duty::DutyRow;
use crate::repositories::{CommonDao, DutyDao};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Duty DAO backed by the `duty` table.
#[derive(Debug, Clone)]
pub struct PgDutyDao {
    db: Database,
}

impl PgDutyDao {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Build the list statement and its bindings.
///
/// `LIMIT` always precedes `OFFSET`, and placeholders are numbered by the
/// clauses actually present.
pub(crate) fn list_query(offset: i64, limit: i64) -> (String, Vec<i64>) {
    let mut sql = format!("SELECT {COLUMNS} FROM duty ORDER BY created_at, id");
    let mut bindings = Vec::new();
    if limit > 0 {
        bindings.push(limit);
        let _ = write!(sql, " LIMIT ${}", bindings.len());
    }
    if offset > 0 {
        bindings.push(offset);
        let _ = write!(sql, " OFFSET ${}", bindings.len());
    }
    (sql, bindings)
}

fn ran(sql: &str) {
    tracing::debug!(query = sql, "Ran query");
}

fn failed(sql: &str, err: sqlx::Error) -> DbError {
    tracing::error!(query = sql, error = %err, "Failed to run query");
    DbError::from(err)
}

#[async_trait]
impl CommonDao for PgDutyDao {
    type Tx = TxConnection;

    async fn begin_tx<T, E, F>(&self, f: F) -> Result<T, E>
    where
        T: Send,
        E: From<DbError> + Send,
        F: for<'c> FnOnce(&'c mut Self::Tx) -> TxFuture<'c, T, E> + Send,
    {
        self.db.begin_tx(f).await
    }

    async fn is_connection_working(&self) -> bool {
        self.db.is_connection_working().await
    }
}

#[async_trait]
impl DutyDao for PgDutyDao {
    async fn get_duties(
        &self,
        offset: i64,
        limit: i64,
        cx: Option<&mut TxConnection>,
    ) -> DbResult<Vec<Duty>> {
        let (sql, bindings) = list_query(offset, limit);
        let mut query = sqlx::query_as::<_, DutyRow>(&sql);
        for value in bindings {
            query = query.bind(value);
        }
        let rows = match cx {
            Some(cx) => query.fetch_all(cx.conn()).await,
            None => query.fetch_all(self.db.pool()).await,
        }
        .map_err(|e| failed(&sql, e))?;
        ran(&sql);
        Ok(rows.into_iter().map(Duty::from).collect())
    }

    async fn get_duty(&self, id: &str, cx: Option<&mut TxConnection>) -> DbResult<Option<Duty>> {
        let sql = format!("SELECT {COLUMNS} FROM duty WHERE id = $1");
        let query = sqlx::query_as::<_, DutyRow>(&sql).bind(id);
        let row = match cx {
            Some(cx) => query.fetch_optional(cx.conn()).await,
            None => query.fetch_optional(self.db.pool()).await,
        }
        .map_err(|e| failed(&sql, e))?;
        ran(&sql);
        Ok(row.map(Duty::from))
    }

    async fn insert_duty(&self, duty: &Duty, cx: Option<&mut TxConnection>) -> DbResult<()> {
        let sql = "INSERT INTO duty (id, name) VALUES ($1, $2)";
        let query = sqlx::query(sql).bind(&duty.id).bind(&duty.name);
        let result = match cx {
            Some(cx) => query.execute(cx.conn()).await,
            None => query.execute(self.db.pool()).await,
        };
        result.map_err(|e| failed(sql, e))?;
        ran(sql);
        Ok(())
    }

    async fn update_duty(&self, duty: &Duty, cx: Option<&mut TxConnection>) -> DbResult<u64> {
        let sql = "UPDATE duty SET name = $1, updated_at = NOW() WHERE id = $2";
        let query = sqlx::query(sql).bind(&duty.name).bind(&duty.id);
        let result = match cx {
            Some(cx) => query.execute(cx.conn()).await,
            None => query.execute(self.db.pool()).await,
        }
        .map_err(|e| failed(sql, e))?;
        ran(sql);
        Ok(result.rows_affected())
    }

    async fn delete_duty(&self, id: &str, cx: Option<&mut TxConnection>) -> DbResult<u64> {
        let sql = "DELETE FROM duty WHERE id = $1";
        let query = sqlx::query(sql).bind(id);
        let result = match cx {
            Some(cx) => query.execute(cx.conn()).await,
            None => query.execute(self.db.pool()).await,
        }
        .map_err(|e| failed(sql, e))?;
        ran(sql);
        Ok(result.rows_affected())
    }
}
