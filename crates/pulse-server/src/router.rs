//! Axum router wiring.
//!
//! `GET /` is the counted endpoint. Everything under `/debug/pprof` is
//! handed verbatim to the diagnostics router supplied by the caller; those
//! requests are never counted and their responses pass through untouched.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState, diagnostics: Router) -> Router {
    Router::new()
        .route("/", get(ops::root))
        .nest_service("/debug/pprof", diagnostics)
        .with_state(state)
}
