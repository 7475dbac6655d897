//! Users: list, register, delete.

use super::{json_body, path_id};
use crate::error::ApiError;
use crate::response::{success_created, success_empty, success_ok, Envelope};
use crate::service::{ById, CrudService, RegisterUser, RegisteredUser, RegistrationService};
use crate::sql::JsonRow;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;

const SELECT_ALL_USERS: &str = "SELECT * FROM users";

const USER_BY_ID: ById = ById {
    entity: "user",
    select: "SELECT * FROM users WHERE id = $1",
    delete: "DELETE FROM users WHERE id = $1 RETURNING id",
};

/// Column never returned to clients.
const PASSWORD_COLUMN: &str = "password";

/// GET /api/users/query
pub async fn list(State(state): State<AppState>) -> Result<Envelope<Vec<JsonRow>>, ApiError> {
    let mut rows = CrudService::list(state.store.as_ref(), SELECT_ALL_USERS)
        .await
        .map_err(|e| state.reject(e))?;
    for row in &mut rows {
        row.remove(PASSWORD_COLUMN);
    }
    Ok(success_ok("users fetched", rows))
}

/// POST /api/users/add
pub async fn add(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> Result<Envelope<RegisteredUser>, ApiError> {
    let req = json_body(payload).map_err(|e| state.reject(e))?;
    let user = RegistrationService::register(state.store.as_ref(), req)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_created("user registered", user))
}

/// DELETE /api/users/delete/:id
pub async fn remove(
    State(state): State<AppState>,
    id: Option<Path<String>>,
) -> Result<Envelope<()>, ApiError> {
    let id = path_id(id, USER_BY_ID.entity).map_err(|e| state.reject(e))?;
    CrudService::delete(state.store.as_ref(), &USER_BY_ID, id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(success_empty("user deleted"))
}
