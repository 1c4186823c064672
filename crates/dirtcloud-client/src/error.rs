//! DirtCloud client error types

use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

/// Error code some endpoints put in the `error` field for missing resources
const NOT_FOUND_CODE: &str = "not_found";

#[derive(Error, Debug)]
pub enum ClientError {
    /// No response was received (DNS, connection refused, timeout, ...)
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(RemoteError),

    #[error("unexpected status: {0}")]
    UnexpectedStatus(RemoteError),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ClientError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(e) if e.is_timeout())
    }

    /// The backend response this error was built from, if any
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            ClientError::NotFound(remote) | ClientError::UnexpectedStatus(remote) => Some(remote),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.remote().map(|r| r.status)
    }
}

/// A non-success response from the backend
#[derive(Debug, Clone)]
pub struct RemoteError {
    pub status: StatusCode,

    /// Backend `message` verbatim, or the status line when the body is not an error document
    pub message: String,

    /// Backend `error` code, when present
    pub code: Option<String>,

    pub details: Option<serde_json::Map<String, serde_json::Value>>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.message, self.status.as_u16())
    }
}

/// Error document returned by the backend
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Classify a response whose status differs from the expected success code.
pub fn classify(status: StatusCode, body: &[u8]) -> ClientError {
    let parsed = serde_json::from_slice::<ErrorBody>(body).ok();

    let (code, message, details) = match parsed {
        Some(b) => (
            b.error.filter(|c| !c.is_empty()),
            b.message.filter(|m| !m.is_empty()),
            b.details,
        ),
        None => (None, None, None),
    };

    let remote = RemoteError {
        status,
        message: message.unwrap_or_else(|| status.to_string()),
        code,
        details,
    };

    let not_found = status == StatusCode::NOT_FOUND
        || remote.code.as_deref() == Some(NOT_FOUND_CODE)
        || remote.message.to_lowercase().contains("not found");

    if not_found {
        ClientError::NotFound(remote)
    } else {
        ClientError::UnexpectedStatus(remote)
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
