//! Uniform response envelope: `{ code, message, data?, error? }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::borrow::Cow;

#[derive(Serialize, Debug)]
pub struct Envelope<T> {
    #[serde(skip)]
    status: StatusCode,
    pub code: u16,
    pub message: Cow<'static, str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    fn new(status: StatusCode, message: impl Into<Cow<'static, str>>, data: Option<T>) -> Self {
        Envelope {
            status,
            code: status.as_u16(),
            message: message.into(),
            data,
            error: None,
        }
    }

    pub fn failure(
        status: StatusCode,
        message: impl Into<Cow<'static, str>>,
        error: Option<String>,
    ) -> Self {
        Envelope {
            error,
            ..Envelope::new(status, message, None)
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

pub fn success_ok<T: Serialize>(message: &'static str, data: T) -> Envelope<T> {
    Envelope::new(StatusCode::OK, message, Some(data))
}

pub fn success_created<T: Serialize>(message: &'static str, data: T) -> Envelope<T> {
    Envelope::new(StatusCode::CREATED, message, Some(data))
}

/// 200 with no `data` member.
pub fn success_empty(message: &'static str) -> Envelope<()> {
    Envelope::new(StatusCode::OK, message, None)
}
