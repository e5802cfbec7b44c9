//! Fetch error types and their user-facing classification.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The call did not finish within the ceiling and was aborted.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The request could not be sent or the body could not be read.
    #[error("Request failed: {0}")]
    Request(String),

    /// Non-2xx HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The envelope reported `success: false`.
    #[error("Rejected by API: {0}")]
    Rejected(String),

    /// The body was not a usable envelope.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Classify for display.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            FetchError::Timeout(_) => LoadErrorKind::Timeout,
            FetchError::Request(_)
            | FetchError::Http { .. }
            | FetchError::Rejected(_)
            | FetchError::Malformed(_) => LoadErrorKind::Fetch,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Malformed(e.to_string())
    }
}

/// What the user is told went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadErrorKind {
    /// The ceiling fired.
    Timeout,
    /// Anything else: network, status, envelope.
    Fetch,
}

impl LoadErrorKind {
    /// Message shown next to the retry action.
    pub fn user_message(&self) -> &'static str {
        match self {
            LoadErrorKind::Timeout => "Request timed out. Please retry.",
            LoadErrorKind::Fetch => "Failed to load products. Please try again later.",
        }
    }
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorKind::Timeout => f.write_str("timeout"),
            LoadErrorKind::Fetch => f.write_str("fetch"),
        }
    }
}

/// A classified load failure, as surfaced by the orchestrator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadFailure {
    /// Classification.
    pub kind: LoadErrorKind,
    /// User-visible message.
    pub message: String,
    /// The underlying error.
    #[source]
    pub cause: FetchError,
}

impl From<FetchError> for LoadFailure {
    fn from(cause: FetchError) -> Self {
        let kind = cause.kind();
        Self {
            kind,
            message: kind.user_message().to_string(),
            cause,
        }
    }
}
