//! Shared utilities for integration tests.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// A request the mock backend received.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

/// Handle to a running mock backend.
#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    hits: Arc<AtomicU32>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> u32 {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock backend that always answers with `status` and a JSON `body`.
#[allow(dead_code)]
pub async fn start_mock_backend(status: u16, body: serde_json::Value) -> MockBackend {
    start_programmable_backend(move |_| {
        let body = body.clone();
        async move { (status, body.to_string()) }
    })
    .await
}

/// Start a programmable mock backend.
///
/// `f` receives the 0-based index of the request and returns the status
/// and raw body to answer with. Every request is captured.
pub async fn start_programmable_backend<F, Fut>(f: F) -> MockBackend
where
    F: Fn(u32) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let backend = MockBackend {
        addr,
        hits: Arc::new(AtomicU32::new(0)),
        requests: Arc::new(Mutex::new(Vec::new())),
    };

    let f = Arc::new(f);
    let state = backend.clone();
    let app = Router::new().fallback(move |request: Request<Body>| {
        let f = f.clone();
        let state = state.clone();
        async move {
            let (parts, body) = request.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
            let header_value = |name: header::HeaderName| {
                parts
                    .headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };

            state.requests.lock().unwrap().push(CapturedRequest {
                method: parts.method.to_string(),
                path: parts.uri.path().to_string(),
                authorization: header_value(header::AUTHORIZATION),
                content_type: header_value(header::CONTENT_TYPE),
                body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
            });

            let index = state.hits.fetch_add(1, Ordering::SeqCst);
            let (status, body) = f(index).await;
            (
                StatusCode::from_u16(status).unwrap_or(StatusCode::OK),
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response()
        }
    });

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    backend
}
