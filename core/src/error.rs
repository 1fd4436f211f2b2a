//! Error types for the fetch flow.
//!
//! # Design
//! `Transport` and `Decode` are the two ways a fetch can fail under the
//! default policy. A non-2xx response is not an error by default; its body is
//! decoded like any other. `Status` only appears when the caller opts into
//! `StatusPolicy::Reject`.

use thiserror::Error;

/// Errors returned by `JsonFetcher`.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or no response was received
    /// (DNS failure, connection refused, timeout, interrupted body).
    #[error("transport failed: {message}")]
    Transport { message: String },

    /// The response body is not valid JSON.
    #[error("decode failed: {message}")]
    Decode { message: String },

    /// The server returned a non-2xx status and the status policy rejects it.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The value was decoded but the sink could not take it.
    #[error("delivery failed: {message}")]
    Deliver { message: String },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Transport {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode {
            message: err.to_string(),
        }
    }
}
