//! The two conversation agents and the routing signal between them.

pub mod interview;
pub mod orchestrator;
pub mod routing;

pub use interview::InterviewAgent;
pub use orchestrator::{AgentReply, OrchestratorAgent};
pub use routing::parse_routing_signal;
