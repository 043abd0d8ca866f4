//! Session lifecycle: the per-channel worker loop and the process-wide
//! registry that enforces at most one session per channel.

mod config;
mod orchestrator;
mod registry;

pub use config::PipelineConfig;
pub use orchestrator::{Orchestrator, StartOutcome};
pub use registry::{RegistryGuard, SessionRegistry, SessionState, SessionStatus};
