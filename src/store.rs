//! Persistence gateway: run one parameterized statement against the pool.

use crate::config::DbConfig;
use crate::error::StorageError;
use crate::sql::{bind_params, row_id, row_to_json, JsonRow, SqlParam};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Result of a write statement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub last_insert_id: Option<i64>,
    pub rows_affected: u64,
}

/// The only capability handlers have on storage. Statement text is `'static`
/// so caller values can only travel as bound params.
#[async_trait]
pub trait SqlStore: Send + Sync {
    /// Run a read and return every row in engine order.
    async fn fetch_all(&self, sql: &'static str, params: &[SqlParam]) -> Result<Vec<JsonRow>, StorageError>;

    /// Run a write. Statements end in `RETURNING id` so the generated id and
    /// the affected row count can be reported.
    async fn execute(&self, sql: &'static str, params: &[SqlParam]) -> Result<WriteOutcome, StorageError>;
}

/// [`SqlStore`] over a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Build a bounded pool without opening a connection; connections are
    /// established on first use, so startup does not depend on the database.
    pub fn connect_lazy(config: &DbConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_lazy_with(connect_options(config));
        PgStore { pool }
    }
}

fn connect_options(config: &DbConfig) -> PgConnectOptions {
    let opts = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .database(&config.database);
    match &config.password {
        Some(password) => opts.password(password),
        None => opts,
    }
}

#[async_trait]
impl SqlStore for PgStore {
    async fn fetch_all(&self, sql: &'static str, params: &[SqlParam]) -> Result<Vec<JsonRow>, StorageError> {
        tracing::debug!(sql = %sql, params = ?params, "query");
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn execute(&self, sql: &'static str, params: &[SqlParam]) -> Result<WriteOutcome, StorageError> {
        tracing::debug!(sql = %sql, params = ?params, "execute");
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&self.pool)
            .await?;
        Ok(WriteOutcome {
            last_insert_id: rows.first().and_then(row_id),
            rows_affected: rows.len() as u64,
        })
    }
}
