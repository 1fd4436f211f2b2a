//! Fetch configuration.
//!
//! The flow always targets the same endpoint with the same header set; those
//! constants live in `FetchConfig::default()`. Tests build their own config to
//! point the fetcher at a stub server.

use std::time::Duration;

use crate::http::HttpMethod;

/// Endpoint the flow targets.
pub const DEFAULT_URL: &str = "http://localhost:8080/";

/// How a non-2xx response is treated before decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Decode the body regardless of status. A 500 carrying valid JSON
    /// yields that JSON.
    #[default]
    Ignore,
    /// Fail with `FetchError::Status` for any non-2xx status.
    Reject,
}

/// Everything one fetch needs to know: where to send the request, what it
/// carries, how long the transport may take, and how a non-2xx status is
/// treated. Build the transport with `HttpTransport::from_config` so the
/// timeout applies.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    /// Read by `HttpTransport::from_config`; `None` leaves the transport
    /// default.
    pub timeout: Option<Duration>,
    pub status_policy: StatusPolicy,
}

impl FetchConfig {
    /// Default configuration aimed at `url` instead of `DEFAULT_URL`.
    pub fn with_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            method: HttpMethod::Get,
            // Describes an outgoing body GET never has; sent anyway so the
            // request matches what the endpoint has always received.
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            timeout: None,
            status_policy: StatusPolicy::Ignore,
        }
    }
}
