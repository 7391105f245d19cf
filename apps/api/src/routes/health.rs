use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version and enhancement mode without probing backends.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let mode = if state.ai.is_available() { "ai" } else { "rule_based" };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "enhancer-api",
        "mode": mode,
    }))
}
