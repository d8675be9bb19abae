//! Failure taxonomy for talking to the Quran API.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, TLS or timeout failure before a status was received.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// The body was not the JSON we asked for.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Decoded fine but the records make no sense (bad ids, foreign verses, ...).
    #[error("unexpected data from {url}: {reason}")]
    InvalidShape { url: String, reason: String },

    #[error("could not build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
