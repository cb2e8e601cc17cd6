use switchboard_core::dispatcher::Dispatcher;

/// Shared application state passed to all route handlers. The dispatcher
/// carries the read-only registry, so no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}
