//! Error types
//!
//! Every fallible operation in this crate returns [`Error`]. Failures reported
//! by the StrawPoll service itself carry an [`ApiError`] with the optional
//! code and message the service sent back.

use std::fmt;
use thiserror::Error;

/// Code and message reported by the StrawPoll service.
///
/// Both parts are optional. The display form mirrors `IOError`-style
/// messages: `[Errno <code>] <message>`, dropping whichever part is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiError {
    code: Option<i64>,
    message: Option<String>,
}

impl ApiError {
    /// Create an error from an optional code and an optional message.
    pub fn new(code: Option<i64>, message: Option<String>) -> Self {
        Self {
            code,
            message: message.filter(|m| !m.is_empty()),
        }
    }

    /// Create an error that only carries a message.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(None, Some(message.into()))
    }

    /// Numeric error code, if the service sent one
    pub fn code(&self) -> Option<i64> {
        self.code
    }

    /// Error message, if the service sent one
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code, self.message.as_deref()) {
            (None, None) => Ok(()),
            (None, Some(message)) => f.write_str(message),
            (Some(code), None) => write!(f, "[Errno {}]", code),
            (Some(code), Some(message)) => write!(f, "[Errno {}] {}", code, message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Errors returned by the StrawPoll client
#[derive(Debug, Error)]
pub enum Error {
    /// The service answered with the plain-text `Bad Request` body it uses
    /// for malformed requests instead of JSON.
    #[error("{0}")]
    BadRequest(ApiError),

    /// The service answered with a JSON `error` payload.
    #[error("StrawPoll error: {0}")]
    Service(ApiError),

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid poll data: {0}")]
    InvalidPoll(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The service-reported error, for `BadRequest` and `Service` failures.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::BadRequest(err) | Error::Service(err) => Some(err),
            _ => None,
        }
    }

    /// Service error code, if any.
    pub fn code(&self) -> Option<i64> {
        self.api_error().and_then(ApiError::code)
    }
}
