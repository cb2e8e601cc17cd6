use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use switchboard_core::SwitchboardError;

/// Unified error type for HTTP responses.
///
/// The actions route handles `UnknownAction` itself (its 404 body carries the
/// registry listing); this mapping is the safety net for everything that
/// reaches the boundary as a plain error.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(e) = self.0.downcast_ref::<SwitchboardError>() {
            match e {
                SwitchboardError::UnknownAction(_) => {
                    let body = serde_json::json!({ "error": e.to_string() });
                    return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
                }
                SwitchboardError::InvalidEnvelope(message) => {
                    let body = serde_json::json!({ "error": message.clone() });
                    return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
                }
                SwitchboardError::Forwarding(_) | SwitchboardError::Json(_) => {}
            }
        }

        let body = serde_json::json!({
            "error": "Internal server error",
            "message": self.0.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
