use serde::Serialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_port() -> u16 {
    3000
}

fn default_hr_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Process configuration, read once at startup from the environment.
///
/// Every variable has a documented fallback so the router starts with no
/// environment at all:
/// - `SWITCHBOARD_PORT` — listening port (default 3000)
/// - `HR_SERVICE_URL` — base URL of the HR backend (default http://localhost:3001)
/// - `SWITCHBOARD_TIMEOUT_SECS` — outbound request timeout (default 30)
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub port: u16,
    pub hr_base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            hr_base_url: default_hr_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            port: parse_var("SWITCHBOARD_PORT", default_port()),
            hr_base_url: std::env::var("HR_SERVICE_URL").unwrap_or_else(|_| default_hr_base_url()),
            request_timeout_secs: parse_var(
                "SWITCHBOARD_TIMEOUT_SECS",
                default_request_timeout_secs(),
            ),
        }
    }
}

/// Read and parse an env var, falling back to `default` when the variable is
/// unset or malformed. A malformed value must never prevent startup.
fn parse_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("ignoring invalid {key}={raw}, using default {default}");
                default
            }
        },
        Err(_) => default,
    }
}
