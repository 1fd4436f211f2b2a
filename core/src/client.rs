//! Request builder, JSON decoder, and the flow that joins them.
//!
//! # Design
//! `JsonFetcher` holds only its `FetchConfig` and carries no mutable state
//! between calls. The flow is split into `build_request` (produces an
//! `HttpRequest`) and `decode` (consumes an `HttpResponse`); `fetch` runs
//! the request through a `Transport` between the two. The send completes
//! fully before decoding starts, and each call resolves exactly once.

use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{FetchConfig, StatusPolicy};
use crate::error::FetchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::sink::Sink;
use crate::transport::{HttpTransport, Transport};

/// Stateless fetcher for one JSON endpoint.
///
/// Builds the request from its `FetchConfig`, sends it through whichever
/// `Transport` the caller supplies, and decodes the body as JSON.
#[derive(Debug, Clone, Default)]
pub struct JsonFetcher {
    config: FetchConfig,
}

impl JsonFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// HTTP transport built from this fetcher's config, timeout included.
    pub fn http_transport(&self) -> Result<HttpTransport, FetchError> {
        HttpTransport::from_config(&self.config)
    }

    pub fn build_request(&self) -> HttpRequest {
        HttpRequest {
            method: self.config.method,
            url: self.config.url.clone(),
            headers: self.config.headers.clone(),
        }
    }

    /// Decode the response body as JSON.
    ///
    /// Under `StatusPolicy::Ignore` the status is not inspected, so an error
    /// page that happens to be valid JSON decodes successfully.
    pub fn decode(&self, response: HttpResponse) -> Result<Value, FetchError> {
        debug!(
            status = response.status,
            content_type = response.header("content-type"),
            bytes = response.body.len(),
            "decoding response"
        );
        if self.config.status_policy == StatusPolicy::Reject && !response.ok() {
            return Err(FetchError::Status {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    pub async fn fetch<T: Transport + Sync>(&self, transport: &T) -> Result<Value, FetchError> {
        let request = self.build_request();
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let response = transport.send(request).await.inspect_err(|err| {
            warn!(url = %self.config.url, "{err}");
        })?;
        self.decode(response).inspect_err(|err| {
            warn!(url = %self.config.url, "{err}");
        })
    }

    /// Run `fetch` and hand the value to `sink`. The sink is not called when
    /// the fetch fails; a sink that cannot take the value yields
    /// `FetchError::Deliver`.
    pub async fn fetch_into<T, S>(&self, transport: &T, sink: &mut S) -> Result<(), FetchError>
    where
        T: Transport + Sync,
        S: Sink + ?Sized,
    {
        let value = self.fetch(transport).await?;
        sink.deliver(value).map_err(|err| FetchError::Deliver {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;

    /// Replays a canned outcome and remembers the request it was given.
    struct CannedTransport {
        outcome: Result<(u16, &'static str), &'static str>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl CannedTransport {
        fn respond(status: u16, body: &'static str) -> Self {
            Self {
                outcome: Ok((status, body)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn fail(message: &'static str) -> Self {
            Self {
                outcome: Err(message),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for CannedTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
            self.seen.lock().unwrap().push(request);
            match self.outcome {
                Ok((status, body)) => Ok(response(status, body)),
                Err(message) => Err(FetchError::Transport {
                    message: message.to_string(),
                }),
            }
        }
    }

    struct ClosedSink;

    impl Sink for ClosedSink {
        fn deliver(&mut self, _value: Value) -> io::Result<()> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
    }

    fn fetcher() -> JsonFetcher {
        JsonFetcher::default()
    }

    fn rejecting() -> JsonFetcher {
        JsonFetcher::new(FetchConfig {
            status_policy: StatusPolicy::Reject,
            ..FetchConfig::default()
        })
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn build_request_produces_get_with_json_header() {
        let req = fetcher().build_request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:8080/");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_request_follows_config() {
        let req = JsonFetcher::new(FetchConfig::with_url("http://127.0.0.1:1234/")).build_request();
        assert_eq!(req.url, "http://127.0.0.1:1234/");
    }

    #[test]
    fn decode_object() {
        let value = fetcher().decode(response(200, r#"{"message":"hello"}"#)).unwrap();
        assert_eq!(value, json!({"message": "hello"}));
    }

    #[test]
    fn decode_not_json() {
        let err = fetcher().decode(response(200, "not json")).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn decode_empty_no_content() {
        let err = fetcher().decode(response(204, "")).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn decode_ignores_error_status_by_default() {
        let value = fetcher().decode(response(500, r#"{"error":"x"}"#)).unwrap();
        assert_eq!(value, json!({"error": "x"}));
    }

    #[test]
    fn decode_error_page_surfaces_as_decode_failure_by_default() {
        let err = fetcher()
            .decode(response(502, "<html>Bad Gateway</html>"))
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[test]
    fn reject_policy_reports_status_before_decoding() {
        let err = rejecting().decode(response(500, r#"{"error":"x"}"#)).unwrap_err();
        match err {
            FetchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, r#"{"error":"x"}"#);
            }
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[test]
    fn reject_policy_still_decodes_success() {
        let value = rejecting().decode(response(201, "[1,2,3]")).unwrap();
        assert_eq!(value, json!([1, 2, 3]));
    }

    #[test]
    fn decode_invalid_utf8() {
        let bad = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: vec![b'"', 0xff, 0xfe, b'"'],
        };
        let err = fetcher().decode(bad).unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn fetch_sends_built_request_and_decodes() {
        let transport = CannedTransport::respond(200, r#"{"message":"hello"}"#);
        let value = fetcher().fetch(&transport).await.unwrap();
        assert_eq!(value, json!({"message": "hello"}));

        let seen = transport.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], fetcher().build_request());
    }

    #[tokio::test]
    async fn fetch_propagates_transport_failure() {
        let transport = CannedTransport::fail("connection refused");
        let err = fetcher().fetch(&transport).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert_eq!(transport.seen.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn fetch_into_delivers_once_on_success() {
        let transport = CannedTransport::respond(200, r#"{"n":1}"#);
        let mut delivered = Vec::new();
        let mut sink = |value: Value| delivered.push(value);
        fetcher().fetch_into(&transport, &mut sink).await.unwrap();
        assert_eq!(delivered, vec![json!({"n": 1})]);
    }

    #[tokio::test]
    async fn fetch_into_delivers_nothing_on_failure() {
        let mut delivered = Vec::new();

        let transport = CannedTransport::respond(200, "not json");
        let mut sink = |value: Value| delivered.push(value);
        let err = fetcher().fetch_into(&transport, &mut sink).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));

        let transport = CannedTransport::fail("dns failure");
        let err = fetcher().fetch_into(&transport, &mut sink).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));

        assert!(delivered.is_empty());
    }

    #[tokio::test]
    async fn fetch_into_reports_sink_failure() {
        let transport = CannedTransport::respond(200, r#"{"n":1}"#);
        let err = fetcher()
            .fetch_into(&transport, &mut ClosedSink)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Deliver { .. }), "got {err:?}");
    }

    #[test]
    fn http_transport_builds_from_config() {
        let fetcher = JsonFetcher::new(FetchConfig {
            timeout: Some(std::time::Duration::from_millis(250)),
            ..FetchConfig::default()
        });
        assert!(fetcher.http_transport().is_ok());
    }
}
