use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::Config;

// ---------------------------------------------------------------------------
// RouteMethod
// ---------------------------------------------------------------------------

/// HTTP methods an action route may declare. Closed set; extend here when a
/// backend actually needs another verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RouteMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RouteMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteMethod::Get => "GET",
            RouteMethod::Post => "POST",
            RouteMethod::Put => "PUT",
            RouteMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RouteMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RouteDescriptor
// ---------------------------------------------------------------------------

/// The (URL, method) pair an action resolves to. Immutable once the registry
/// is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDescriptor {
    pub url: String,
    pub method: RouteMethod,
}

// ---------------------------------------------------------------------------
// ServiceRoutes
// ---------------------------------------------------------------------------

/// A named partial mapping contributed by one backend service: its base URL
/// plus the (action, path suffix, method) triples it exposes.
#[derive(Debug, Clone)]
pub struct ServiceRoutes {
    name: String,
    base_url: String,
    routes: Vec<(String, String, RouteMethod)>,
}

impl ServiceRoutes {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            routes: Vec::new(),
        }
    }

    /// Register one action at `base_url + path`.
    pub fn route(
        mut self,
        action: impl Into<String>,
        path: impl Into<String>,
        method: RouteMethod,
    ) -> Self {
        self.routes.push((action.into(), path.into(), method));
        self
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The immutable action-name → route-descriptor mapping. Built once at
/// startup; shared read-only for the process lifetime.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    actions: HashMap<String, RouteDescriptor>,
}

impl Registry {
    /// Merge the per-service partial mappings, in order. A later service
    /// overwrites an earlier one on action-name collision; the overwrite is
    /// logged so accidental shadowing is visible at startup.
    pub fn build(services: &[ServiceRoutes]) -> Self {
        let mut actions: HashMap<String, RouteDescriptor> = HashMap::new();
        let mut owners: HashMap<&str, &str> = HashMap::new();

        for service in services {
            for (action, path, method) in &service.routes {
                let descriptor = RouteDescriptor {
                    url: format!("{}{}", service.base_url, path),
                    method: *method,
                };
                if let Some(previous) = owners.insert(action, &service.name) {
                    tracing::warn!(
                        "action '{action}' from service '{previous}' overwritten by service '{}'",
                        service.name
                    );
                }
                actions.insert(action.clone(), descriptor);
            }
        }

        Self { actions }
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, action: &str) -> Option<&RouteDescriptor> {
        self.actions.get(action)
    }

    /// All known action names, sorted — stable output for diagnostics and
    /// error responses.
    pub fn list_actions(&self) -> Vec<String> {
        let mut names: Vec<String> = self.actions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Default catalog
// ---------------------------------------------------------------------------

/// The reference deployment's catalog: a single HR backend exposing the
/// employee actions. Additional services append their own `ServiceRoutes`
/// here as they come online.
pub fn default_catalog(config: &Config) -> Vec<ServiceRoutes> {
    vec![ServiceRoutes::new("hr", &config.hr_base_url)
        .route("CreateEmployee", "/employees/create", RouteMethod::Post)
        .route("GetEmployee", "/employees/get", RouteMethod::Post)
        .route("UpdateEmployee", "/employees/update", RouteMethod::Post)
        .route("ListEmployees", "/employees/list", RouteMethod::Get)
        .route("DeactivateEmployee", "/employees/deactivate", RouteMethod::Post)]
}
