//! HTTP request and response values passed across the transport seam.
//!
//! # Design
//! `JsonFetcher` builds an `HttpRequest` as plain data and decodes an
//! `HttpResponse` without knowing how the bytes travelled. A `Transport`
//! implementation sits between the two and performs the actual I/O, so the
//! build and decode halves stay deterministic and testable on their own.

use serde::{Deserialize, Serialize};

/// HTTP method for a request. The flow only ever reads, so GET is the
/// only method there is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `JsonFetcher::build_request` and consumed by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// A completed HTTP response described as plain data.
///
/// The body is raw bytes; `JsonFetcher::decode` takes the response by value,
/// so it is read exactly once.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// True iff the status is in the 2xx range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}
