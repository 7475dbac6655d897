//! User registration: validate, pre-check uniqueness, hash, insert.
//!
//! The pre-check and the insert are separate round trips. Two registrations
//! for the same username can both pass the pre-check; the storage uniqueness
//! constraint then rejects the second insert and it is reported as the same
//! conflict.

use crate::error::{AppError, DuplicateField, StorageError};
use crate::service::{password, CrudService, RequestValidator};
use crate::sql::SqlParam;
use crate::store::SqlStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const FIND_BY_USERNAME_OR_PHONE: &str = "SELECT * FROM users WHERE username = $1 OR phone = $2";
const INSERT_USER: &str = "INSERT INTO users (username, password, phone) VALUES ($1, $2, $3) RETURNING id";

/// Registration body. Every field is optional so that absence is reported as a
/// validation message instead of a body rejection.
#[derive(Deserialize, Debug, Default)]
pub struct RegisterUser {
    pub username: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct RegisteredUser {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub username: String,
    pub phone: String,
}

pub struct RegistrationService;

impl RegistrationService {
    pub async fn register(store: &dyn SqlStore, req: RegisterUser) -> Result<RegisteredUser, AppError> {
        let username = RequestValidator::required(req.username.as_deref(), "username")?;
        let plain = RequestValidator::required(req.password.as_deref(), "password")?;
        let phone = RequestValidator::required(req.phone.as_deref(), "phone")?;
        RequestValidator::phone(&phone)?;

        let existing = store
            .fetch_all(
                FIND_BY_USERNAME_OR_PHONE,
                &[SqlParam::from(username.as_str()), SqlParam::from(phone.as_str())],
            )
            .await?;
        if let Some(row) = existing.first() {
            let field = if row.get("username").and_then(Value::as_str) == Some(username.as_str()) {
                DuplicateField::Username
            } else {
                DuplicateField::Phone
            };
            tracing::warn!(field = %field, "registration rejected by pre-check");
            return Err(AppError::Conflict(field));
        }

        let hashed = password::hash(plain).await?;
        let params = [
            SqlParam::from(username.as_str()),
            SqlParam::Redacted(hashed),
            SqlParam::from(phone.as_str()),
        ];
        let user_id = match CrudService::insert(store, INSERT_USER, &params).await {
            Ok(id) => id,
            Err(AppError::Storage(StorageError::Duplicate { constraint, .. })) => {
                let field = DuplicateField::from_constraint(constraint.as_deref());
                tracing::warn!(field = %field, "registration rejected by unique constraint");
                return Err(AppError::Conflict(field));
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id, "user registered");
        Ok(RegisteredUser {
            user_id,
            username,
            phone,
        })
    }
}
