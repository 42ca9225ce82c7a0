//! Common result and error types for all ports

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while reading an external source
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceError {
    /// Transport-level failure (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Non-success HTTP status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// Malformed or unexpected payload
    #[error("Parse error: {0}")]
    Parse(String),

    /// No API key configured for the source
    #[error("Missing credential: {0}")]
    MissingCredential(String),
}

impl SourceError {
    /// Check if a retry could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Http(_) | SourceError::Timeout => true,
            SourceError::Status { status, .. } => *status == 429 || *status >= 500,
            SourceError::Parse(_) | SourceError::MissingCredential(_) => false,
        }
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SourceError::Timeout
        } else if err.is_decode() {
            SourceError::Parse(err.to_string())
        } else {
            SourceError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Parse(err.to_string())
    }
}

/// Outcome of one adapter read
///
/// Adapters never return errors; failures surface as `Unavailable` so the
/// orchestrator can decide between aborting and degrading.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    /// At least one record
    Records(Vec<T>),
    /// The source answered with nothing
    Empty,
    /// Transport, status or payload failure
    Unavailable(SourceError),
}

impl<T> FetchOutcome<T> {
    pub fn from_result(result: Result<Vec<T>, SourceError>) -> Self {
        match result {
            Ok(records) if records.is_empty() => FetchOutcome::Empty,
            Ok(records) => FetchOutcome::Records(records),
            Err(err) => FetchOutcome::Unavailable(err),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FetchOutcome::Unavailable(_))
    }

    pub fn records(&self) -> &[T] {
        match self {
            FetchOutcome::Records(records) => records,
            FetchOutcome::Empty | FetchOutcome::Unavailable(_) => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// Records of the fetch; empty for `Empty` and `Unavailable`
    pub fn into_records(self) -> Vec<T> {
        match self {
            FetchOutcome::Records(records) => records,
            FetchOutcome::Empty | FetchOutcome::Unavailable(_) => Vec::new(),
        }
    }
}
