//! Request descriptions and call outcomes

use bytes::Bytes;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::ClientError;

/// One field of a multipart form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: Option<String>,
        data: Bytes,
    },
}

impl FormField {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Text { name, .. } | Self::File { name, .. } => name,
        }
    }
}

/// Request body
///
/// Kept as plain data rather than a built `reqwest` body so the request can be
/// rebuilt for the retry after a token refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<FormField>),
}

/// An authenticated call waiting to be issued
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub method: Method,
    /// Path relative to the base URL, or an absolute `http(s)` URL
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    /// Overrides the client's default timeout for this call
    pub timeout: Option<Duration>,
    pub cancellation: Option<CancellationToken>,
}

impl PendingRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
            cancellation: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Serialize `value` as the JSON body
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Serialization`] if `value` cannot be represented
    /// as JSON
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self, ClientError> {
        self.body = RequestBody::Json(serde_json::to_value(value)?);
        Ok(self)
    }

    #[must_use]
    pub fn form(mut self, fields: Vec<FormField>) -> Self {
        self.body = RequestBody::Form(fields);
        self
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }
}

/// Build a fresh multipart form; forms cannot be cloned once built
pub(crate) fn build_form(fields: &[FormField]) -> Result<Form, ClientError> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(name.clone(), value.clone()),
            FormField::File {
                name,
                file_name,
                content_type,
                data,
            } => {
                let mut part = Part::bytes(data.to_vec()).file_name(file_name.clone());
                if let Some(mime) = content_type {
                    part = part.mime_str(mime)?;
                }
                form.part(name.clone(), part)
            }
        };
    }
    Ok(form)
}

/// Final result of an authenticated call that did not fail in transport
#[derive(Debug)]
pub enum Outcome {
    /// The server's response, untouched. May carry any status, including a
    /// 401 that survived the refresh-and-retry cycle.
    Response(reqwest::Response),
    /// No usable credentials remain and the login navigation has been
    /// requested
    LoggedOut,
}

impl Outcome {
    pub fn into_response(self) -> Option<reqwest::Response> {
        match self {
            Self::Response(response) => Some(response),
            Self::LoggedOut => None,
        }
    }

    pub const fn is_logged_out(&self) -> bool {
        matches!(self, Self::LoggedOut)
    }

    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Response(response) => Some(response.status()),
            Self::LoggedOut => None,
        }
    }
}
