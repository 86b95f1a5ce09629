//! Built-in diagnostics surface.
//!
//! The routing core treats whatever is mounted under `/debug/pprof` as an
//! opaque handler; this module provides the router the binary mounts there.
//! Probes are deliberately small: an index, the process command line, and
//! process uptime. Requests here bypass the request counter entirely.

use std::time::Instant;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};

pub fn router() -> Router {
    let started = Instant::now();
    Router::new()
        .route("/", get(index))
        .route("/cmdline", get(cmdline))
        .route("/uptime", get(move || uptime(started)))
        .fallback(unknown_probe)
}

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "probes": ["cmdline", "uptime"],
    }))
}

async fn cmdline() -> impl IntoResponse {
    let args: Vec<String> = std::env::args().collect();
    args.join(" ")
}

async fn uptime(started: Instant) -> impl IntoResponse {
    format!("{}", started.elapsed().as_secs())
}

async fn unknown_probe() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "unknown probe")
}
