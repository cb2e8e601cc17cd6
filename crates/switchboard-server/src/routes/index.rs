use axum::Json;
use serde_json::Value;

/// GET / — static service descriptor.
pub async fn index() -> Json<Value> {
    Json(serde_json::json!({
        "service": "switchboard",
        "description": "Single-endpoint action router",
        "endpoints": {
            "POST /actions/execute": "Execute a registered action",
            "GET /health": "Service health and registered actions",
        },
    }))
}
