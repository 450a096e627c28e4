//! Data access for the `duty` table.
//!
//! [`Database`] owns the connection pool and the transaction wrapper;
//! [`repositories`] holds the DAO capability traits and their two store
//! variants (PostgreSQL and in-memory).

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod repositories;

pub use config::DatabaseConfig;
pub use database::{Database, TxConnection, TxFuture};
pub use error::{DbError, DbResult};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the given configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
}

/// Apply the embedded migrations under `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
