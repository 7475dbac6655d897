//! Collections: list, add, delete. Content is optional; a blank value is stored as NULL.

use super::{json_body, path_id, ContentBody, CreatedId};
use crate::error::{ApiError, AppError};
use crate::response::{success_empty, success_ok, Envelope};
use crate::service::{ById, CrudService, RequestValidator};
use crate::sql::{JsonRow, SqlParam};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

const SELECT_ALL_COLLECTIONS: &str = "SELECT * FROM collections";
const INSERT_COLLECTION: &str = "INSERT INTO collections (content) VALUES ($1) RETURNING id";

const COLLECTION_BY_ID: ById = ById {
    entity: "collection",
    select: "SELECT * FROM collections WHERE id = $1",
    delete: "DELETE FROM collections WHERE id = $1 RETURNING id",
};

/// GET /api/collections/query
pub async fn list(State(state): State<AppState>) -> Result<Envelope<Vec<JsonRow>>, ApiError> {
    let rows = CrudService::list(state.store.as_ref(), SELECT_ALL_COLLECTIONS)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_ok("collections fetched", rows))
}

/// POST /api/collections/add
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<ContentBody>, JsonRejection>,
) -> Result<Envelope<CreatedId>, ApiError> {
    let created = async {
        let body = json_body(payload)?;
        let content = SqlParam::from(RequestValidator::optional(body.content.as_deref()));
        let id = CrudService::insert(state.store.as_ref(), INSERT_COLLECTION, &[content]).await?;
        Ok::<_, AppError>(CreatedId { id })
    }
    .await
    .map_err(|e| state.reject(e))?;
    Ok(success_ok("collection added", created))
}

/// DELETE /api/collections/delete/:id
pub async fn remove(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> Result<Envelope<()>, ApiError> {
    let id = path_id(id, COLLECTION_BY_ID.entity).map_err(|e| state.reject(e))?;
    CrudService::delete(state.store.as_ref(), &COLLECTION_BY_ID, id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_empty("collection deleted"))
}
