//! Request field validation.

use crate::error::AppError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Domestic 11-digit mobile number: leading 1, second digit 3-9.
/// ASCII classes only; `\d` would also accept non-ASCII digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^1[3-9][0-9]{9}$").expect("invalid phone regex"));

pub struct RequestValidator;

impl RequestValidator {
    /// Trim a required field. Absent and whitespace-only values fail with
    /// `"<field> required"`.
    pub fn required(value: Option<&str>, field: &str) -> Result<String, AppError> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .ok_or_else(|| AppError::Validation(format!("{} required", field)))
    }

    /// Trim an optional field; blank becomes absent.
    pub fn optional(value: Option<&str>) -> Option<String> {
        value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
    }

    pub fn is_valid_phone(phone: &str) -> bool {
        PHONE_RE.is_match(phone)
    }

    /// Expects an already-trimmed value.
    pub fn phone(phone: &str) -> Result<(), AppError> {
        if Self::is_valid_phone(phone) {
            Ok(())
        } else {
            Err(AppError::Validation("invalid phone format".into()))
        }
    }

    /// Path id: must be present and an integer.
    pub fn id(raw: Option<&str>, entity: &str) -> Result<i64, AppError> {
        let raw = Self::required(raw, &format!("{} id", entity))?;
        raw.parse()
            .map_err(|_| AppError::Validation(format!("invalid {} id", entity)))
    }
}
