//! Generic list / insert / delete over one table through the gateway.

use crate::error::AppError;
use crate::sql::{JsonRow, SqlParam};
use crate::store::SqlStore;

/// Statements addressing one row of a table by id.
pub struct ById {
    /// Singular entity name used in messages ("user", "evaluation").
    pub entity: &'static str,
    /// `SELECT ... WHERE id = $1`
    pub select: &'static str,
    /// `DELETE ... WHERE id = $1 RETURNING id`
    pub delete: &'static str,
}

pub struct CrudService;

impl CrudService {
    /// Every row of the statement, in engine order.
    pub async fn list(store: &dyn SqlStore, select_all: &'static str) -> Result<Vec<JsonRow>, AppError> {
        Ok(store.fetch_all(select_all, &[]).await?)
    }

    /// Insert one row and return its generated id.
    pub async fn insert(
        store: &dyn SqlStore,
        insert: &'static str,
        params: &[SqlParam],
    ) -> Result<i64, AppError> {
        let outcome = store.execute(insert, params).await?;
        outcome
            .last_insert_id
            .ok_or_else(|| AppError::Internal("insert reported no generated id".into()))
    }

    /// Existence check, then delete. Two independent round trips; a row removed
    /// in between still counts as deleted.
    pub async fn delete(store: &dyn SqlStore, stmts: &ById, id: i64) -> Result<(), AppError> {
        let params = [SqlParam::Int(id)];
        let existing = store.fetch_all(stmts.select, &params).await?;
        if existing.is_empty() {
            return Err(AppError::NotFound(stmts.entity));
        }
        let outcome = store.execute(stmts.delete, &params).await?;
        tracing::debug!(entity = stmts.entity, id, rows = outcome.rows_affected, "deleted");
        Ok(())
    }
}
