//! Client error types

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Field precedence used when picking a single message out of an error body
const MESSAGE_FIELDS: &[&str] = &[
    "username",
    "email",
    "password",
    "detail",
    "non_field_errors",
];

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The call did not finish within its deadline
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The caller cancelled the call
    #[error("Request cancelled")]
    Cancelled,

    /// No usable credentials remain; the session was ended
    #[error("Session expired, login required")]
    SessionExpired,

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Credential or preference storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] lending_core::Error),

    /// Local file error (exports)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// True when the user has to log in again
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::AuthenticationFailed(_))
    }

    /// True for transport failures, as opposed to an error status or a body
    /// that failed to decode
    pub fn is_network(&self) -> bool {
        match self {
            Self::Request(e) => !e.is_decode() && !e.is_builder(),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if it came from a response
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body for status errors
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::BadRequest(m)
            | Self::AuthenticationFailed(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::ServerError { message: m, .. } => Some(m),
            _ => None,
        }
    }

    /// Response body parsed as JSON, for field-level validation errors
    pub fn body_json(&self) -> Option<Value> {
        self.body().and_then(|b| serde_json::from_str(b).ok())
    }

    /// A single human-readable message from a structured error body
    ///
    /// Known fields are checked in a fixed order, then any remaining field.
    /// Field values may be a string or a list of strings.
    pub fn first_message(&self) -> Option<String> {
        let body = self.body_json()?;
        let object = body.as_object()?;

        MESSAGE_FIELDS
            .iter()
            .filter_map(|field| object.get(*field))
            .chain(object.values())
            .find_map(message_of)
    }
}

fn message_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(message_of),
        _ => None,
    }
}
