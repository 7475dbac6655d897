//! Shop API: CRUD over goods, users, evaluations and collections backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{AppConfig, DbConfig, Environment};
pub use error::{ApiError, AppError, ConfigError, DuplicateField, StorageError};
pub use response::Envelope;
pub use routes::{api_routes, app, common_routes};
pub use sql::{JsonRow, SqlParam};
pub use state::AppState;
pub use store::{PgStore, SqlStore, WriteOutcome};
