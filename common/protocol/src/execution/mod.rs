//! Agent identification and per-call inference context.

mod agent_kind;
mod identity;
mod inference_context;

pub use agent_kind::AgentKind;
pub use identity::ExecutionIdentity;
pub use inference_context::InferenceContext;
