// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark target service.
//!
//! The HTTP app `bench-load` points at by default. It sits behind either a
//! sidecar proxy or an eBPF data plane during a comparison run:
//!
//! - `GET /ping` answers `pong`
//! - `GET /work?ms=N` burns CPU for N milliseconds, then answers `ok`
//! - `GET /metrics` exposes Prometheus request counters and latencies
//!
//! Every `/ping` and `/work` request is written to the access log as one JSON
//! line.

use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Query, Request, State},
    http::{Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{SecondsFormat, Utc};
use lazy_static::lazy_static;
use prometheus::{register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

lazy_static! {
    pub static ref HTTP_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "app_http_requests_total",
        "Total HTTP requests.",
        &["path", "method", "code"]
    )
    .expect("app_http_requests_total registers once");
    pub static ref HTTP_REQUEST_DURATION: HistogramVec = register_histogram_vec!(
        "app_http_request_duration_seconds",
        "Request duration histogram.",
        &["path", "method"]
    )
    .expect("app_http_request_duration_seconds registers once");
}

/// JSON-lines access log: stdout, plus an append-only file when configured.
pub struct AccessLog {
    file: Option<Mutex<File>>,
}

impl AccessLog {
    /// Log to stdout only.
    pub fn stdout() -> Self {
        Self { file: None }
    }

    /// Log to stdout and append to `path`, creating parent directories.
    pub fn with_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }

    fn write(&self, line: serde_json::Value) {
        let line = line.to_string();
        println!("{}", line);

        if let Some(file) = &self.file {
            match file.lock() {
                Ok(mut file) => {
                    if let Err(e) = writeln!(file, "{}", line) {
                        tracing::warn!(error = %e, "Failed to write access log");
                    }
                }
                Err(_) => tracing::warn!("Access log lock poisoned, line dropped"),
            }
        }
    }
}

/// App state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    access_log: Arc<AccessLog>,
}

impl AppState {
    pub fn new(access_log: AccessLog) -> Self {
        Self {
            access_log: Arc::new(access_log),
        }
    }
}

/// Build the app router.
pub fn router(state: AppState) -> Router {
    lazy_static::initialize(&HTTP_REQUESTS);
    lazy_static::initialize(&HTTP_REQUEST_DURATION);

    Router::new()
        .route("/ping", get(ping))
        .route("/work", get(work))
        // Only the routes above are measured.
        .route_layer(middleware::from_fn(track_metrics))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the app on an already bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    tracing::info!(addr = ?listener.local_addr()?, pid = std::process::id(), "App starting");
    axum::serve(listener, router(state)).await
}

async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().to_string();

    let response = next.run(req).await;

    HTTP_REQUEST_DURATION
        .with_label_values(&[path.as_str(), method.as_str()])
        .observe(start.elapsed().as_secs_f64());
    HTTP_REQUESTS
        .with_label_values(&[path.as_str(), method.as_str(), response.status().as_str()])
        .inc();

    response
}

async fn ping(State(state): State<AppState>, method: Method) -> &'static str {
    let start = Instant::now();
    state.access_log.write(json!({
        "ts": timestamp(),
        "path": "/ping",
        "method": method.as_str(),
        "latency_ms": start.elapsed().as_millis() as u64,
    }));
    "pong"
}

async fn work(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<&'static str, StatusCode> {
    let start = Instant::now();
    let ts = timestamp();

    // Missing or malformed values mean no work, like a negative one.
    let ms = params
        .get("ms")
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(0)
        .max(0) as u64;

    tokio::task::spawn_blocking(move || busy_wait(Duration::from_millis(ms)))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Busy-wait task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    state.access_log.write(json!({
        "ts": ts,
        "path": "/work",
        "ms": ms,
        "latency_ms": start.elapsed().as_millis() as u64,
    }));
    Ok("ok")
}

async fn metrics() -> impl IntoResponse {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return (StatusCode::INTERNAL_SERVER_ERROR, String::new());
    }

    (
        StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_else(|_| String::from("Encoding error")),
    )
}

/// Spin on the CPU until `d` has elapsed.
fn busy_wait(d: Duration) {
    let until = Instant::now() + d;
    let mut x = 0.0001_f64;
    while Instant::now() < until {
        x += x.sqrt() * 0.000001;
        if x > 1e9 {
            x = 0.0001;
        }
        std::hint::black_box(x);
    }
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn spawn_app(access_log: AccessLog) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, AppState::new(access_log)));
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_ping() {
        let base = spawn_app(AccessLog::stdout()).await;
        let resp = reqwest::get(format!("{}/ping", base)).await.unwrap();
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.text().await.unwrap(), "pong");
    }

    #[tokio::test]
    async fn test_work_busy_waits() {
        let base = spawn_app(AccessLog::stdout()).await;

        let start = Instant::now();
        let resp = reqwest::get(format!("{}/work?ms=30", base)).await.unwrap();
        assert_eq!(resp.text().await.unwrap(), "ok");
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_work_tolerates_bad_ms() {
        let base = spawn_app(AccessLog::stdout()).await;
        for query in ["ms=-5", "ms=lots", ""] {
            let resp = reqwest::get(format!("{}/work?{}", base, query)).await.unwrap();
            assert_eq!(resp.status(), 200, "query {:?}", query);
        }
    }

    #[tokio::test]
    async fn test_metrics_count_requests() {
        let base = spawn_app(AccessLog::stdout()).await;
        reqwest::get(format!("{}/ping", base)).await.unwrap();

        let body = reqwest::get(format!("{}/metrics", base))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("app_http_requests_total"));
        assert!(body.contains("app_http_request_duration_seconds"));
        assert!(body.contains("path=\"/ping\""));
        assert!(!body.contains("path=\"/metrics\""));
    }

    #[tokio::test]
    async fn test_access_log_file_gets_json_lines() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("app").join("app.log");
        let base = spawn_app(AccessLog::with_file(&log_path).unwrap()).await;

        reqwest::get(format!("{}/ping", base)).await.unwrap();
        reqwest::get(format!("{}/work?ms=1", base)).await.unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["path"], "/ping");
        assert_eq!(lines[0]["method"], "GET");
        assert_eq!(lines[1]["path"], "/work");
        assert_eq!(lines[1]["ms"], 1);
    }
}
