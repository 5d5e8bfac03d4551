use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the fetch pipeline and payload persistence.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the response body could not be read.
    #[error("request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {snippet}")]
    Status { status: StatusCode, snippet: String },

    /// The body was not valid JSON, or a required field was absent.
    #[error("malformed weather payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A structural hole serde cannot name on its own, reported as a key path.
    #[error("weather payload is missing `{0}`")]
    MissingKey(String),

    /// The configured endpoint is not a usable base URL.
    #[error("invalid endpoint URL `{url}`: {reason}")]
    Endpoint { url: String, reason: String },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification used by front ends to pick an error message,
/// instead of matching variants or scraping `Display` output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failures, non-2xx statuses, unusable endpoint URLs.
    Request,
    /// Invalid JSON or missing keys in the response body.
    DataFormat,
    /// Local filesystem failures.
    Storage,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Transport(_) | FetchError::Status { .. } | FetchError::Endpoint { .. } => {
                ErrorKind::Request
            }
            FetchError::Json(_) | FetchError::MissingKey(_) => ErrorKind::DataFormat,
            FetchError::Write { .. } => ErrorKind::Storage,
        }
    }
}
