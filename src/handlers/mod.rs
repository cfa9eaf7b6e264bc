pub mod catalog;
pub mod enhance;
pub mod responses;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    // Oversize uploads must reach the validator to get a descriptive error.
    let body_limit = state.enhancer.max_upload_bytes() * 2 + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health))
        .route("/api/enhance", post(enhance::enhance))
        .route("/api/analyze", post(enhance::analyze))
        .route("/api/prompt/preview", post(catalog::preview_prompt))
        .route("/api/catalog", get(catalog::catalog))
        .route("/api/presets/product/{preset}", get(catalog::product_preset))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(responses::handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
