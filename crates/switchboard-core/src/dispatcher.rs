use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, SwitchboardError};
use crate::forwarder::{ForwardReply, Forwarder};
use crate::registry::Registry;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Execution flag distinguishing a dry-run from a real effect. Interpretation
/// is entirely the downstream service's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Simulate,
    Execute,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Simulate => "simulate",
            Mode::Execute => "execute",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = SwitchboardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "simulate" => Ok(Mode::Simulate),
            "execute" => Ok(Mode::Execute),
            _ => Err(SwitchboardError::InvalidEnvelope(format!(
                "mode must be \"simulate\" or \"execute\", got \"{s}\""
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Resolves an action through the registry and delegates to the forwarder.
/// Cheap to clone; the registry is shared read-only.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
    forwarder: Forwarder,
}

impl Dispatcher {
    pub fn new(registry: Registry, forwarder: Forwarder) -> Self {
        Self {
            registry: Arc::new(registry),
            forwarder,
        }
    }

    /// All registered action names, sorted. Used by the boundary for error
    /// responses and health reporting.
    pub fn actions(&self) -> Vec<String> {
        self.registry.list_actions()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Look up `action`, merge `mode` into `args` (mode wins on key clash),
    /// and forward. The downstream reply is returned unchanged — this layer
    /// never inspects response bodies.
    pub async fn dispatch(
        &self,
        action: &str,
        args: &Map<String, Value>,
        mode: Mode,
    ) -> Result<ForwardReply> {
        let descriptor = self
            .registry
            .lookup(action)
            .ok_or_else(|| SwitchboardError::UnknownAction(action.to_string()))?;

        tracing::info!(
            "dispatching action '{action}' (mode {mode}) to {} {}",
            descriptor.method,
            descriptor.url
        );

        let mut merged = args.clone();
        merged.insert("mode".to_string(), Value::String(mode.as_str().to_string()));
        let payload = Value::Object(merged);
        tracing::debug!("action '{action}' payload: {payload}");

        self.forwarder
            .forward(&descriptor.url, descriptor.method, Some(&payload))
            .await
    }
}
