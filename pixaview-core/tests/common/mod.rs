//! Shared fixtures for the pixaview-core integration tests.
//!
//! [`FakeProvider`] scripts page results per query and records every call;
//! [`spawn_stub`] starts an in-process HTTP server that imitates the search
//! endpoint and a small image CDN.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use parking_lot::Mutex;
use pixaview_core::model::{ImagePair, RawImage, SearchError, SearchState};
use pixaview_core::{PairingProvider, StateSubscription};
use serde_json::json;
use tokio::sync::Semaphore;
use url::Url;

pub type PageResult = Result<Vec<ImagePair>, SearchError>;

pub fn image(query: &str, page: u32, index: usize, themed: bool) -> RawImage {
    let kind = if themed { "themed" } else { "primary" };
    RawImage::new(
        index as u64,
        format!("{query}, {kind}"),
        Url::parse(&format!(
            "https://cdn.example.com/{kind}/{query}/{page}/{index}_640.jpg"
        ))
        .unwrap(),
        Url::parse(&format!(
            "https://cdn.example.com/{kind}/{query}/{page}/{index}_1280.jpg"
        ))
        .unwrap(),
    )
}

/// `count` pairs for one page; the first `themed` of them carry a themed image.
pub fn pairs(query: &str, page: u32, count: usize, themed: usize) -> Vec<ImagePair> {
    (0..count)
        .map(|i| {
            ImagePair::new(
                image(query, page, i, false),
                (i < themed).then(|| image(query, page, i, true)),
            )
        })
        .collect()
}

/// Scripted [`PairingProvider`]. Unscripted pages come back empty.
#[derive(Debug, Default)]
pub struct FakeProvider {
    calls: Mutex<Vec<(String, u32)>>,
    pages: Mutex<HashMap<(String, u32), PageResult>>,
    gate: Option<Arc<Semaphore>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every search waits for a permit on the returned semaphore. Permits
    /// are handed out in call order.
    pub fn gated() -> (Self, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let provider = Self {
            gate: Some(gate.clone()),
            ..Self::default()
        };
        (provider, gate)
    }

    pub fn with_page(self, query: &str, page: u32, result: PageResult) -> Self {
        self.pages.lock().insert((query.to_string(), page), result);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PairingProvider for FakeProvider {
    async fn search(&self, query: &str, page: u32) -> PageResult {
        self.calls.lock().push((query.to_string(), page));
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.pages
            .lock()
            .get(&(query.to_string(), page))
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Next published state, failing the test if none arrives in time.
pub async fn next_state(subscription: &mut StateSubscription) -> SearchState {
    tokio::time::timeout(Duration::from_secs(10), subscription.recv())
        .await
        .expect("timed out waiting for a state")
        .expect("state store closed")
}

/// Lets every ready task run without moving virtual time meaningfully.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

/// One request seen by the stub search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    pub key: String,
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

#[derive(Clone, Default)]
pub struct StubLog {
    pub requests: Arc<Mutex<Vec<StubRequest>>>,
    pub image_hits: Arc<AtomicUsize>,
}

impl StubLog {
    pub fn requests(&self) -> Vec<StubRequest> {
        self.requests.lock().clone()
    }

    pub fn image_hits(&self) -> usize {
        self.image_hits.load(Ordering::SeqCst)
    }
}

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Starts the stub server and returns its base URL (`http://127.0.0.1:port`).
///
/// Search behaviour by query (`q`):
/// - `cats`, `cats graffiti`, `dogs`: 10 hits per page, 500 on page 2 of `cats`
/// - `dogs graffiti`, `boom`, `boom graffiti`: HTTP 500
/// - `garbled`: 200 with a body that is not JSON
/// - anything else: zero hits
pub async fn spawn_stub() -> (String, StubLog) {
    let log = StubLog::default();
    let app = Router::new()
        .route("/api/", get(search))
        .route("/img/{name}", get(serve_image))
        .with_state(log.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), log)
}

async fn search(
    State(log): State<StubLog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let field = |name: &str| params.get(name).cloned().unwrap_or_default();
    let request = StubRequest {
        key: field("key"),
        query: field("q"),
        page: field("page").parse().unwrap_or(0),
        per_page: field("per_page").parse().unwrap_or(0),
    };
    log.requests.lock().push(request.clone());

    match (request.query.as_str(), request.page) {
        ("cats", 2) | ("dogs graffiti", _) | ("boom", _) | ("boom graffiti", _) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response()
        }
        ("garbled", _) => (StatusCode::OK, "<html>not json</html>").into_response(),
        ("cats", _) | ("cats graffiti", _) | ("dogs", _) => {
            let slug = request.query.replace(' ', "_");
            let hits: Vec<_> = (0..request.per_page)
                .map(|i| {
                    json!({
                        "id": request.page * 1000 + i,
                        "tags": format!("{}, tag{i}", request.query),
                        "webformatURL": format!("https://cdn.example.com/{slug}/{}/{i}_640.jpg", request.page),
                        "largeImageURL": format!("https://cdn.example.com/{slug}/{}/{i}_1280.jpg", request.page),
                    })
                })
                .collect();
            axum::Json(json!({ "total": 500, "totalHits": 500, "hits": hits })).into_response()
        }
        _ => axum::Json(json!({ "total": 0, "totalHits": 0, "hits": [] })).into_response(),
    }
}

async fn serve_image(State(log): State<StubLog>, Path(name): Path<String>) -> Response {
    log.image_hits.fetch_add(1, Ordering::SeqCst);
    match name.as_str() {
        "ok.png" => ([(header::CONTENT_TYPE, "image/png")], PNG_BYTES).into_response(),
        "text.png" => "definitely not an image".into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}
