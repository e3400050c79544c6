use axum::response::Json;
use serde_json::{json, Value};

/// Liveness probe.
/// GET /api/health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "FluxTrade API is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
