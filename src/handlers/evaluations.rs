//! Evaluations: list, add (content required), delete.

use super::{json_body, path_id, ContentBody, CreatedId};
use crate::error::{ApiError, AppError};
use crate::response::{success_empty, success_ok, Envelope};
use crate::service::{ById, CrudService, RequestValidator};
use crate::sql::{JsonRow, SqlParam};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

const SELECT_ALL_EVALUATIONS: &str = "SELECT * FROM evaluations";
const INSERT_EVALUATION: &str = "INSERT INTO evaluations (content) VALUES ($1) RETURNING id";

const EVALUATION_BY_ID: ById = ById {
    entity: "evaluation",
    select: "SELECT * FROM evaluations WHERE id = $1",
    delete: "DELETE FROM evaluations WHERE id = $1 RETURNING id",
};

/// GET /api/evaluations/query
pub async fn list(State(state): State<AppState>) -> Result<Envelope<Vec<JsonRow>>, ApiError> {
    let rows = CrudService::list(state.store.as_ref(), SELECT_ALL_EVALUATIONS)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_ok("evaluations fetched", rows))
}

/// POST /api/evaluations/add
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<ContentBody>, JsonRejection>,
) -> Result<Envelope<CreatedId>, ApiError> {
    let created = async {
        let body = json_body(payload)?;
        let content = RequestValidator::required(body.content.as_deref(), "content")?;
        let id = CrudService::insert(state.store.as_ref(), INSERT_EVALUATION, &[SqlParam::Text(content)]).await?;
        Ok::<_, AppError>(CreatedId { id })
    }
    .await
    .map_err(|e| state.reject(e))?;
    Ok(success_ok("evaluation added", created))
}

/// DELETE /api/evaluations/delete/:id
pub async fn remove(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> Result<Envelope<()>, ApiError> {
    let id = path_id(id, EVALUATION_BY_ID.entity).map_err(|e| state.reject(e))?;
    CrudService::delete(state.store.as_ref(), &EVALUATION_BY_ID, id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_empty("evaluation deleted"))
}
