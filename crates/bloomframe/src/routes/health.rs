//! Health check endpoints.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Basic health check (is the server running?)
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Serialize)]
pub struct ReadyResponse {
    status: &'static str,
    challenges: usize,
    credentials: usize,
    projects: usize,
    uptime_secs: u64,
}

/// Readiness check with catalog sizes
pub async fn ready_check(State(state): State<AppState>) -> Json<ReadyResponse> {
    Json(ReadyResponse {
        status: "ready",
        challenges: state.catalog.challenges().len(),
        credentials: state.catalog.credential_count(),
        projects: state.catalog.projects().len(),
        uptime_secs: state.started_at.elapsed().as_secs(),
    })
}
