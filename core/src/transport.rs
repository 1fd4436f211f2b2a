//! The I/O half of the flow.
//!
//! `Transport` takes an `HttpRequest` and resolves to an `HttpResponse`.
//! `HttpTransport` is the reqwest-backed implementation the binary uses.

use std::future::Future;

use reqwest::{Client, Method};
use tracing::debug;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes one request and returns the complete response.
///
/// Any status code is a successful send; only failing to get a response at
/// all is an error, reported as `FetchError::Transport`.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

/// Transport over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a client carrying the transport settings of `config`. A
    /// `timeout` there bounds the whole exchange, body included.
    pub fn from_config(config: &FetchConfig) -> Result<Self, FetchError> {
        // The endpoint is local; proxy env vars must not reroute it.
        let mut builder = Client::builder().no_proxy();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self.client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
    }
}
