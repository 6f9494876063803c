//! A turn: one round of the conversation loop, from user input through the
//! assistant's reply and any tool calls it made along the way.

use crate::tracked::TrackedMessage;
use chrono::DateTime;
use chrono::Utc;
use hyper_sdk::ToolResultContent;
use tessera_protocol::TokenUsage;

/// Why a tool call was aborted before it finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The user interrupted the running turn.
    UserInterrupted,
    /// The tool call exceeded its execution timeout.
    Timeout,
    /// The turn loop shut down while the call was still running.
    Shutdown,
}

/// Lifecycle state of a tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCallStatus {
    /// Requested by the model, not yet started.
    Pending,
    /// Currently executing.
    Running,
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
    /// Aborted before completion.
    Aborted {
        /// Why the call was aborted.
        reason: AbortReason,
    },
}

impl ToolCallStatus {
    /// Whether the call is currently executing.
    pub fn is_running(&self) -> bool {
        matches!(self, ToolCallStatus::Running)
    }

    /// Whether the call finished successfully.
    pub fn is_success(&self) -> bool {
        matches!(self, ToolCallStatus::Success)
    }

    /// Whether the call has reached a terminal state (won't transition again).
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ToolCallStatus::Success | ToolCallStatus::Failed { .. } | ToolCallStatus::Aborted { .. }
        )
    }
}

/// A tool call requested during a turn, tracked through its lifecycle.
#[derive(Debug, Clone)]
pub struct TrackedToolCall {
    /// Id the model used to reference this call.
    pub call_id: String,
    /// Name of the tool invoked.
    pub name: String,
    /// Arguments passed to the tool, as JSON.
    pub arguments: serde_json::Value,
    /// Current lifecycle state.
    pub status: ToolCallStatus,
    /// When execution started.
    pub started_at: Option<DateTime<Utc>>,
    /// When execution finished (success, failure, or abort).
    pub completed_at: Option<DateTime<Utc>>,
    /// Result content, once complete.
    pub output: Option<ToolResultContent>,
}

impl TrackedToolCall {
    /// Build a pending tool call from its id, tool name, and arguments.
    pub fn from_parts(
        call_id: impl Into<String>,
        name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        Self {
            call_id: call_id.into(),
            name: name.into(),
            arguments,
            status: ToolCallStatus::Pending,
            started_at: None,
            completed_at: None,
            output: None,
        }
    }

    /// Transition to running.
    pub fn start(&mut self) {
        self.status = ToolCallStatus::Running;
        self.started_at = Some(Utc::now());
    }

    /// Record a successful result.
    pub fn complete(&mut self, output: ToolResultContent) {
        self.status = ToolCallStatus::Success;
        self.completed_at = Some(Utc::now());
        self.output = Some(output);
    }

    /// Record a failure.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.status = ToolCallStatus::Failed {
            reason: reason.into(),
        };
        self.completed_at = Some(Utc::now());
    }

    /// Record an abort.
    pub fn abort(&mut self, reason: AbortReason) {
        self.status = ToolCallStatus::Aborted { reason };
        self.completed_at = Some(Utc::now());
    }
}

/// One round of the conversation: a user message, the assistant's reply, and
/// any tool calls the assistant made while producing that reply.
#[derive(Debug, Clone)]
pub struct Turn {
    /// 1-based ordinal of this turn within the conversation.
    pub number: i32,
    /// The user message that started the turn.
    pub user_message: TrackedMessage,
    /// The assistant's reply, once produced.
    pub assistant_message: Option<TrackedMessage>,
    /// Tool calls made while producing the reply.
    pub tool_calls: Vec<TrackedToolCall>,
    /// Token usage accumulated across this turn's model calls.
    pub usage: TokenUsage,
    /// When the turn started.
    pub created_at: DateTime<Utc>,
    /// When the turn was marked complete.
    completed_at: Option<DateTime<Utc>>,
}

impl Turn {
    /// Start a new turn from its ordinal and opening user message.
    pub fn new(number: i32, user_message: TrackedMessage) -> Self {
        Self {
            number,
            user_message,
            assistant_message: None,
            tool_calls: Vec::new(),
            usage: TokenUsage::default(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Attach the assistant's reply.
    pub fn set_assistant_message(&mut self, message: TrackedMessage) {
        self.assistant_message = Some(message);
    }

    /// Record a tool call made during this turn.
    pub fn add_tool_call(&mut self, call: TrackedToolCall) {
        self.tool_calls.push(call);
    }

    /// Look up a tool call by id for mutation (e.g. to complete it).
    pub fn get_tool_call_mut(&mut self, call_id: &str) -> Option<&mut TrackedToolCall> {
        self.tool_calls.iter_mut().find(|tc| tc.call_id == call_id)
    }

    /// How many tool calls in this turn have not reached a terminal state.
    pub fn pending_tool_count(&self) -> usize {
        self.tool_calls
            .iter()
            .filter(|tc| !tc.status.is_terminal())
            .count()
    }

    /// Whether every tool call in this turn has reached a terminal state.
    pub fn all_tools_complete(&self) -> bool {
        self.tool_calls.iter().all(|tc| tc.status.is_terminal())
    }

    /// Accumulate token usage for this turn.
    pub fn update_usage(&mut self, usage: TokenUsage) {
        self.usage.input_tokens += usage.input_tokens;
        self.usage.output_tokens += usage.output_tokens;
    }

    /// Whether this turn has been marked complete.
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Mark the turn as finished.
    pub fn complete(&mut self) {
        self.completed_at = Some(Utc::now());
    }

    /// How long the turn took, once complete.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|end| end - self.created_at)
    }
}

#[cfg(test)]
#[path = "turn.test.rs"]
mod tests;
