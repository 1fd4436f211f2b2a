use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};

pub use axum::http::StatusCode;

/// A request as the stub saw it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
}

pub type RequestLog = Arc<RwLock<Vec<RecordedRequest>>>;

/// Canned answer for `GET /` plus a log of every request received.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to `app`.
#[derive(Clone, Debug)]
pub struct Stub {
    status: StatusCode,
    body: String,
    log: RequestLog,
}

impl Stub {
    /// Answer with `status` and `body`. The body is sent verbatim; it does
    /// not have to be valid JSON.
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            log: Arc::default(),
        }
    }

    pub fn json(value: &Value) -> Self {
        Self::new(StatusCode::OK, value.to_string())
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.log.read().await.clone()
    }
}

impl Default for Stub {
    fn default() -> Self {
        Self::new(StatusCode::OK, r#"{"message":"hello"}"#)
    }
}

pub fn app(stub: Stub) -> Router {
    Router::new()
        .route("/", get(respond))
        .route("/requests", get(list_requests))
        .with_state(stub)
}

pub async fn run(listener: TcpListener, stub: Stub) -> Result<(), std::io::Error> {
    axum::serve(listener, app(stub)).await
}

async fn respond(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect(),
    };
    tracing::debug!(method = %recorded.method, path = %recorded.path, "request");
    stub.log.write().await.push(recorded);

    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body,
    )
}

async fn list_requests(State(stub): State<Stub>) -> Json<Vec<RecordedRequest>> {
    Json(stub.requests().await)
}
