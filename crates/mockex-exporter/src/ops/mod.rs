//! Operational HTTP endpoints.
//!
//! - `/`        : service info (JSON)
//! - `/healthz` : liveness
//! - `/readyz`  : readiness (503 when draining)
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use mockex_core::expo;

use crate::app_state::AppState;

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "service": "mockex",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "metrics": "/metrics",
            "health": "/healthz",
            "ready": "/readyz",
        },
        "metrics_count": state.registry().len(),
    }))
}

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        (StatusCode::SERVICE_UNAVAILABLE, "draining")
    } else {
        (StatusCode::OK, "ready")
    }
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().render();

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, expo::CONTENT_TYPE)],
        body,
    )
        .into_response()
}
