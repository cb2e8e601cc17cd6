use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::state::AppState;

/// GET /health — liveness plus the registered action list.
pub async fn health(State(app): State<AppState>) -> Json<Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "registeredActions": app.dispatcher.actions(),
    }))
}
