use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwitchboardError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("forwarding failed: {0}")]
    Forwarding(String),

    #[error("invalid envelope: {0}")]
    InvalidEnvelope(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SwitchboardError>;
