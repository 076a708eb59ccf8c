use axum::Json;
use serde_json::{json, Value};

use crate::llm_client::MODEL;

/// GET /health
/// Reports liveness plus the completion model every analysis uses.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "skills-api",
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL,
    }))
}
