//! Served endpoints.
//!
//! - `/` : counted acknowledgment endpoint

use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::app_state::AppState;

/// One increment per hit, fixed `ok` body. Cannot fail.
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    state.counter().increment();
    (StatusCode::OK, "ok")
}
