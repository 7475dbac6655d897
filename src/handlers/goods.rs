//! Goods catalogue. Rows are created outside this service; only listing is exposed.

use crate::error::ApiError;
use crate::response::{success_ok, Envelope};
use crate::service::CrudService;
use crate::sql::JsonRow;
use crate::state::AppState;
use axum::extract::State;

const SELECT_ALL_GOODS: &str = "SELECT * FROM goods";

/// GET /api/goods
pub async fn list(State(state): State<AppState>) -> Result<Envelope<Vec<JsonRow>>, ApiError> {
    let rows = CrudService::list(state.store.as_ref(), SELECT_ALL_GOODS)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_ok("goods fetched", rows))
}
