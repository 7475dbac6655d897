//! HTTP handlers, one module per resource. Each owns its SQL text.

pub mod collections;
pub mod evaluations;
pub mod goods;
pub mod users;

use crate::error::AppError;
use crate::service::RequestValidator;
use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::Json;
use serde::{Deserialize, Serialize};

/// Body of the evaluation and collection add endpoints.
#[derive(Deserialize, Debug, Default)]
pub struct ContentBody {
    pub content: Option<String>,
}

/// `data` of a create response.
#[derive(Serialize, Debug)]
pub struct CreatedId {
    pub id: i64,
}

/// Unwrap a JSON body, turning axum's rejection into a validation error.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "request body rejected");
            Err(AppError::Validation("invalid request body".into()))
        }
    }
}

/// Id segment of a delete route; the id-less routes pass `None`.
pub(crate) fn path_id(id: Option<Path<String>>, entity: &str) -> Result<i64, AppError> {
    RequestValidator::id(id.as_ref().map(|Path(raw)| raw.as_str()), entity)
}
