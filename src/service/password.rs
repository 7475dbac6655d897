//! One-way salted password hashing.

use crate::error::AppError;

/// bcrypt work factor.
pub const HASH_COST: u32 = 10;

/// Hash on the blocking pool; bcrypt at cost 10 takes tens of milliseconds.
pub async fn hash(plain: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, HASH_COST))
        .await
        .map_err(|e| AppError::Internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(format!("hashing failed: {}", e)))
}
