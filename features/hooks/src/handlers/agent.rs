//! Agent handler: delegates verification to a sub-agent.
//!
//! This is currently a stub. Running an actual sub-agent requires a
//! `SpawnAgentFn` callback (a turn-loop entry point) injected into
//! `HookRegistry`, which does not exist yet. `execute` always returns
//! `HookResult::Continue`; `parse_verification_response` is provided so the
//! response-parsing half of the flow can be exercised and wired up once a
//! spawn callback is available.

use serde::Deserialize;
use serde::Serialize;

use crate::result::HookResult;

/// Response format expected from a delegated verification agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentVerificationResponse {
    /// Whether the action is approved.
    pub ok: bool,
    /// Reason for rejection (if ok is false).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Configuration for agent-based verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentVerificationConfig {
    /// System prompt given to the delegated agent.
    pub system_prompt: String,
    /// Maximum number of turns the agent can run.
    pub max_turns: i32,
    /// Tools the delegated agent is allowed to use.
    pub allowed_tools: Vec<String>,
}

impl Default for AgentVerificationConfig {
    fn default() -> Self {
        Self {
            system_prompt: String::from(
                "You are a verification agent. Inspect the proposed action and respond with \
                 JSON: { \"ok\": true } to approve or { \"ok\": false, \"reason\": \"...\" } to \
                 reject.",
            ),
            max_turns: 50,
            allowed_tools: vec![
                "Read".to_string(),
                "Grep".to_string(),
                "Glob".to_string(),
            ],
        }
    }
}

/// Handles hooks that delegate to a sub-agent.
pub struct AgentHandler;

impl AgentHandler {
    /// Stub execution: a real spawn callback is not wired in yet, so this
    /// always allows the action through.
    pub fn execute(_max_turns: i32) -> HookResult {
        HookResult::Continue
    }

    /// Parses a delegated agent's final response.
    ///
    /// Mirrors `PromptHandler::parse_verification_response`: accepts a bare
    /// JSON response or JSON embedded in surrounding analysis text, and
    /// fails open (returns `Continue`) if no JSON can be found.
    pub fn parse_verification_response(response: &str) -> HookResult {
        let trimmed = response.trim();

        if let Ok(resp) = serde_json::from_str::<AgentVerificationResponse>(trimmed) {
            return Self::response_to_result(resp);
        }

        if let Some(start) = trimmed.find('{')
            && let Some(end) = trimmed.rfind('}')
        {
            let json_str = &trimmed[start..=end];
            if let Ok(resp) = serde_json::from_str::<AgentVerificationResponse>(json_str) {
                return Self::response_to_result(resp);
            }
        }

        tracing::warn!(
            response = %response,
            "Failed to parse agent verification response, allowing action"
        );
        HookResult::Continue
    }

    fn response_to_result(resp: AgentVerificationResponse) -> HookResult {
        if resp.ok {
            HookResult::Continue
        } else {
            HookResult::Reject {
                reason: resp
                    .reason
                    .unwrap_or_else(|| "Verification rejected by agent".to_string()),
            }
        }
    }
}

#[cfg(test)]
#[path = "agent.test.rs"]
mod tests;
