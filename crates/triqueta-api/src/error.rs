//! API error types and user-facing messages.

use serde_json::Value;
use thiserror::Error;
use triqueta_auth::AuthError;

/// Shown when nothing more specific can be said.
pub const FALLBACK_MESSAGE: &str = "Ocurrió un error inesperado";

/// Error type for typed API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status. `detail` is the
    /// `detail` member of the JSON body, when there was one.
    #[error("HTTP {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<Value> },

    /// Authentication layer error (transport, session expiry, storage)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request or response body could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn detail_suffix(detail: &Option<Value>) -> String {
    detail
        .as_ref()
        .and_then(message_from_detail)
        .map(|message| format!(": {}", message))
        .unwrap_or_default()
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Auth(AuthError::UnexpectedStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// True when the session is gone and the user must log in again.
    pub fn requires_login(&self) -> bool {
        matches!(self, ApiError::Auth(e) if e.requires_login())
    }

    /// A message fit to show an end user.
    ///
    /// FastAPI puts the reason in `detail`: a string is used as is, a list
    /// of validation errors becomes their `msg`s joined by ", ", an object
    /// yields its `msg` or `message`. Without a usable detail the error's
    /// own text is used.
    pub fn user_message(&self) -> String {
        let detail = match self {
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Auth(AuthError::UnexpectedStatus { body, .. }) => {
                serde_json::from_str::<Value>(body)
                    .ok()
                    .and_then(|body| body.get("detail").cloned())
            }
            ApiError::Auth(AuthError::InvalidCredentials(detail)) => {
                return detail.clone();
            }
            _ => None,
        };

        if let Some(message) = detail.as_ref().and_then(message_from_detail) {
            return message;
        }

        let text = self.to_string();
        if text.trim().is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            text
        }
    }
}

/// Human text out of a FastAPI `detail` value.
pub fn message_from_detail(detail: &Value) -> Option<String> {
    match detail {
        Value::String(message) => Some(message.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(message_or_json)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => Some(message_or_json(detail)),
        _ => None,
    }
}

fn message_or_json(item: &Value) -> String {
    ["msg", "message"]
        .iter()
        .find_map(|key| match item.get(*key) {
            Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
            _ => None,
        })
        .unwrap_or_else(|| item.to_string())
}

/// Result type alias using ApiError.
pub type ApiResult<T> = Result<T, ApiError>;
