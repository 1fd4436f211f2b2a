//! Fetch a JSON document over HTTP and hand it to a consumer.
//!
//! # Overview
//! One invocation builds a GET request for the configured endpoint, sends it
//! through a `Transport`, decodes the body as JSON, and delivers the value to
//! a `Sink`. There is no retry, no caching, and no state shared between
//! invocations.
//!
//! # Design
//! - `JsonFetcher` is stateless; it holds only its `FetchConfig`.
//! - The flow is split into `build_request` (produces an `HttpRequest`) and
//!   `decode` (consumes an `HttpResponse`), so the I/O boundary is explicit
//!   and both halves can be tested without a network.
//! - `HttpTransport` is the reqwest-backed transport; tests may substitute
//!   their own.
//! - Non-2xx responses are decoded like any other unless the config selects
//!   `StatusPolicy::Reject`.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod sink;
pub mod transport;

pub use client::JsonFetcher;
pub use config::{FetchConfig, StatusPolicy, DEFAULT_URL};
pub use error::FetchError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use sink::{Sink, StdoutSink};
pub use transport::{HttpTransport, Transport};
