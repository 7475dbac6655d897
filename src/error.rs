//! Typed errors and HTTP mapping.

use crate::response::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: '{value}'")]
    Invalid { var: &'static str, value: String },
}

/// Failure reported by the persistence gateway. Never retried.
#[derive(Error, Debug)]
pub enum StorageError {
    /// The engine rejected a write because of a uniqueness constraint.
    #[error("{message}")]
    Duplicate {
        constraint: Option<String>,
        message: String,
    },
    #[error("{0}")]
    Engine(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return StorageError::Duplicate {
                    constraint: db.constraint().map(String::from),
                    message: db.message().to_string(),
                };
            }
        }
        StorageError::Engine(e.to_string())
    }
}

/// Which unique user attribute collided on registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DuplicateField {
    Username,
    Phone,
    /// The engine reported a violation we cannot attribute to one column.
    UsernameOrPhone,
}

impl DuplicateField {
    /// Attribute a uniqueness violation to a column from the constraint name
    /// (`users_username_key`, `users_phone_key`, ...).
    pub fn from_constraint(constraint: Option<&str>) -> Self {
        let name = constraint.unwrap_or("").to_ascii_lowercase();
        if name.contains("username") {
            DuplicateField::Username
        } else if name.contains("phone") {
            DuplicateField::Phone
        } else {
            DuplicateField::UsernameOrPhone
        }
    }
}

impl fmt::Display for DuplicateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DuplicateField::Username => "username",
            DuplicateField::Phone => "phone",
            DuplicateField::UsernameOrPhone => "username or phone",
        })
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0} already registered")]
    Conflict(DuplicateField),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("internal: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_server_fault(&self) -> bool {
        self.status().is_server_error()
    }
}

/// Generic detail returned for server faults when raw messages are withheld.
pub const WITHHELD_DETAIL: &str = "unexpected server error";

/// An [`AppError`] paired with the disclosure policy of the running instance.
/// Built through `AppState::reject`.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    expose_detail: bool,
}

impl ApiError {
    pub fn new(error: AppError, expose_detail: bool) -> Self {
        ApiError {
            error,
            expose_detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let body = if self.error.is_server_fault() {
            tracing::error!(error = %self.error, "request failed");
            let detail = if self.expose_detail {
                match &self.error {
                    AppError::Storage(e) => e.to_string(),
                    AppError::Internal(msg) => msg.clone(),
                    other => other.to_string(),
                }
            } else {
                WITHHELD_DETAIL.to_string()
            };
            Envelope::<()>::failure(status, "internal server error", Some(detail))
        } else {
            Envelope::<()>::failure(status, self.error.to_string(), None)
        };
        body.into_response()
    }
}
