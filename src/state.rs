//! Shared application state for all routes.

use crate::error::{ApiError, AppError};
use crate::store::SqlStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SqlStore>,
    /// Return raw storage messages to clients (development only).
    pub expose_error_detail: bool,
}

impl AppState {
    pub fn new(store: Arc<dyn SqlStore>, expose_error_detail: bool) -> Self {
        AppState {
            store,
            expose_error_detail,
        }
    }

    /// Convert a failure into the response for this instance's disclosure policy.
    pub fn reject(&self, error: AppError) -> ApiError {
        ApiError::new(error, self.expose_error_detail)
    }
}
