use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};

use switchboard_core::dispatcher::Mode;
use switchboard_core::SwitchboardError;

use crate::error::AppError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Envelope validation
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Envelope<'a> {
    action: &'a str,
    args: &'a Map<String, Value>,
    mode: Mode,
}

/// Field-by-field validation so each violation yields the exact 400 message
/// the contract promises. The body is taken as a raw `Value` (not a serde
/// struct) for the same reason.
fn parse_envelope(body: &Value) -> Result<Envelope<'_>, String> {
    let action = match body.get("action") {
        Some(Value::String(s)) if !s.is_empty() => s.as_str(),
        Some(_) => return Err("'action' must be a non-empty string".to_string()),
        None => return Err("Missing required field: action".to_string()),
    };

    let args = match body.get("args") {
        Some(Value::Object(map)) => map,
        Some(_) => return Err("'args' must be an object".to_string()),
        None => return Err("Missing required field: args".to_string()),
    };

    let mode = match body.get("mode") {
        Some(Value::String(s)) => s
            .parse::<Mode>()
            .map_err(|_| format!("'mode' must be \"simulate\" or \"execute\", got \"{s}\""))?,
        Some(_) => return Err("'mode' must be \"simulate\" or \"execute\"".to_string()),
        None => return Err("Missing required field: mode".to_string()),
    };

    Ok(Envelope { action, args, mode })
}

// ---------------------------------------------------------------------------
// POST /actions/execute
// ---------------------------------------------------------------------------

/// Validate the envelope, dispatch, and relay the downstream response
/// verbatim. Every code path resolves to a well-formed JSON response —
/// including a non-JSON request body, which axum's Json extractor would
/// otherwise reject with a plain-text 400.
pub async fn execute_action(
    State(app): State<AppState>,
    body: String,
) -> Result<Response, AppError> {
    let parsed: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => return Ok(bad_request("request body must be valid JSON")),
    };

    let envelope = match parse_envelope(&parsed) {
        Ok(envelope) => envelope,
        Err(message) => return Ok(bad_request(&message)),
    };

    match app
        .dispatcher
        .dispatch(envelope.action, envelope.args, envelope.mode)
        .await
    {
        Ok(reply) => {
            // Downstream status is reflected directly, not wrapped.
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            Ok((status, Json(reply.data)).into_response())
        }
        Err(err @ SwitchboardError::UnknownAction(_)) => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": err.to_string(),
                "availableActions": app.dispatcher.actions(),
            })),
        )
            .into_response()),
        Err(err) => {
            tracing::error!("action dispatch failed: {err}");
            Err(err.into())
        }
    }
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}
