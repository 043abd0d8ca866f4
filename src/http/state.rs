use crate::session::Orchestrator;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Session orchestrator driving all per-channel workers
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self { orchestrator }
    }
}
