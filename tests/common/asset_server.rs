//! Local HTTP server standing in for both an image host and a pre-signed
//! upload endpoint. Records every request it receives.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, put};
use axum::Router;

pub const IMAGE_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-payload";
pub const AUTH_TOKEN: &str = "lin_api_test_token";
pub const DENIED_BODY: &str =
    "<?xml version=\"1.0\"?><Error><Code>SignatureDoesNotMatch</Code></Error>";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Recorded>>>);

impl Recorder {
    fn push(&self, method: Method, path: &str, headers: HeaderMap, body: Bytes) {
        self.0.lock().unwrap().push(Recorded {
            method,
            path: path.to_string(),
            headers,
            body,
        });
    }
}

pub struct AssetServer {
    pub base: String,
    recorder: Recorder,
}

impl AssetServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.recorder.0.lock().unwrap().clone()
    }
}

/// Bind to an ephemeral port and serve on the current runtime.
pub async fn start() -> AssetServer {
    let recorder = Recorder::default();
    let app = Router::new()
        .route("/image.png", get(image))
        .route("/missing.png", get(missing))
        .route("/private.png", get(private))
        .route("/moved.png", get(moved))
        .route("/slow.png", get(slow_image))
        .route("/upload/ok", put(upload_ok))
        .route("/upload/no-content", put(upload_no_content))
        .route("/upload/denied", put(upload_denied))
        .route("/upload/slow", put(upload_slow))
        .with_state(recorder.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    AssetServer {
        base: format!("http://{}", addr),
        recorder,
    }
}

async fn image(State(rec): State<Recorder>, headers: HeaderMap) -> impl IntoResponse {
    rec.push(Method::GET, "/image.png", headers, Bytes::new());
    (StatusCode::OK, IMAGE_BYTES)
}

async fn missing(State(rec): State<Recorder>, headers: HeaderMap) -> impl IntoResponse {
    rec.push(Method::GET, "/missing.png", headers, Bytes::new());
    (StatusCode::NOT_FOUND, "not found")
}

async fn private(State(rec): State<Recorder>, headers: HeaderMap) -> impl IntoResponse {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(AUTH_TOKEN);
    rec.push(Method::GET, "/private.png", headers, Bytes::new());
    if authorized {
        (StatusCode::OK, IMAGE_BYTES).into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "unauthorized").into_response()
    }
}

async fn moved() -> Redirect {
    Redirect::temporary("/image.png")
}

async fn slow_image() -> impl IntoResponse {
    tokio::time::sleep(Duration::from_secs(30)).await;
    (StatusCode::OK, IMAGE_BYTES)
}

async fn upload_ok(State(rec): State<Recorder>, headers: HeaderMap, body: Bytes) -> StatusCode {
    rec.push(Method::PUT, "/upload/ok", headers, body);
    StatusCode::OK
}

async fn upload_no_content(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    rec.push(Method::PUT, "/upload/no-content", headers, body);
    StatusCode::NO_CONTENT
}

async fn upload_denied(
    State(rec): State<Recorder>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    rec.push(Method::PUT, "/upload/denied", headers, body);
    (StatusCode::FORBIDDEN, DENIED_BODY)
}

async fn upload_slow(body: Bytes) -> StatusCode {
    let _ = body;
    tokio::time::sleep(Duration::from_secs(30)).await;
    StatusCode::OK
}
