//! Per-request inference context: which model, which agent, which turn.

use super::AgentKind;
use super::ExecutionIdentity;
use crate::ModelInfo;
use crate::ModelSpec;
use crate::ThinkingLevel;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

/// Everything needed to issue and label a single inference call.
///
/// Built once per call from the resolved model config and the caller's
/// identity, then threaded through provider dispatch and back into
/// telemetry/logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceContext {
    /// Unique ID for this inference call.
    pub call_id: String,
    /// Session this call belongs to.
    pub session_id: String,
    /// Turn number within the session.
    pub turn_number: i32,
    /// Resolved provider/model.
    pub model_spec: ModelSpec,
    /// Resolved model configuration.
    pub model_info: ModelInfo,
    /// What kind of agent is making this call.
    pub agent_kind: AgentKind,
    /// How the model was originally addressed (role, explicit spec, inherited).
    pub original_identity: ExecutionIdentity,
    /// Explicit thinking level override for this call, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thinking_level: Option<ThinkingLevel>,
    /// Free-form request options layered on top of the model's defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_options: Option<HashMap<String, serde_json::Value>>,
}

impl InferenceContext {
    /// Build a new inference context.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        call_id: impl Into<String>,
        session_id: impl Into<String>,
        turn_number: i32,
        model_spec: ModelSpec,
        model_info: ModelInfo,
        agent_kind: AgentKind,
        original_identity: ExecutionIdentity,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            turn_number,
            model_spec,
            model_info,
            agent_kind,
            original_identity,
            thinking_level: None,
            request_options: None,
        }
    }

    /// The provider name.
    pub fn provider(&self) -> &str {
        &self.model_spec.provider
    }

    /// The model name.
    pub fn model(&self) -> &str {
        &self.model_spec.model
    }

    /// The model's context window, if configured.
    pub fn context_window(&self) -> Option<i64> {
        self.model_info.context_window
    }

    /// The model's max output tokens, if configured.
    pub fn max_output_tokens(&self) -> Option<i64> {
        self.model_info.max_output_tokens
    }

    /// The model's sampling temperature, if configured.
    pub fn temperature(&self) -> Option<f64> {
        self.model_info.temperature
    }

    /// Builder: set an explicit thinking level override.
    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.thinking_level = Some(level);
        self
    }

    /// Builder: set request options.
    pub fn with_request_options(mut self, options: HashMap<String, serde_json::Value>) -> Self {
        self.request_options = Some(options);
        self
    }

    /// Look up a single request option.
    pub fn get_request_option(&self, key: &str) -> Option<&serde_json::Value> {
        self.request_options.as_ref()?.get(key)
    }

    /// The effective thinking level: explicit override, else the model's
    /// resolved default, else `None` if neither is set.
    pub fn effective_thinking_level(&self) -> Option<ThinkingLevel> {
        self.thinking_level
            .clone()
            .or_else(|| self.model_info.default_thinking_level.clone())
    }

    /// Whether thinking is enabled for this call.
    pub fn is_thinking_enabled(&self) -> bool {
        self.effective_thinking_level()
            .is_some_and(|level| level.is_enabled())
    }

    /// Whether this call is made by the main agent.
    pub fn is_main(&self) -> bool {
        self.agent_kind.is_main()
    }

    /// Whether this call is made by a subagent.
    pub fn is_subagent(&self) -> bool {
        self.agent_kind.is_subagent()
    }

    /// Whether this call is a compaction call.
    pub fn is_compaction(&self) -> bool {
        self.agent_kind.is_compaction()
    }

    /// Derive a child context for a subagent call, inheriting model config
    /// and session, but with its own call ID and identity.
    pub fn child_context(
        &self,
        call_id: impl Into<String>,
        agent_type: impl Into<String>,
        original_identity: ExecutionIdentity,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: self.session_id.clone(),
            turn_number: self.turn_number,
            model_spec: self.model_spec.clone(),
            model_info: self.model_info.clone(),
            agent_kind: AgentKind::subagent(self.session_id.clone(), agent_type),
            original_identity,
            thinking_level: None,
            request_options: None,
        }
    }
}

#[cfg(test)]
#[path = "inference_context.test.rs"]
mod tests;
