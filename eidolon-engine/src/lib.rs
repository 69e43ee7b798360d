pub mod fallback;
pub mod orchestrator;
pub mod prompt;
pub mod providers;

pub use orchestrator::ResponseOrchestrator;
pub use providers::provider::{GenerateError, GenerativeProvider, strip_control_tokens};
