//! Accumulated state of a streaming response, updated as events arrive.

use crate::response::FinishReason;
use crate::response::TokenUsage;
use crate::tools::ToolCall;

/// Accumulated state of a single extended-thinking block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThinkingSnapshot {
    pub content: String,
    pub signature: Option<String>,
    pub is_complete: bool,
}

impl ThinkingSnapshot {
    /// Create an empty, in-progress thinking snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta to the accumulated content.
    pub fn append(&mut self, delta: &str) {
        self.content.push_str(delta);
    }

    /// Mark the thinking block complete, attaching its signature if any.
    pub fn complete(&mut self, signature: Option<String>) {
        self.signature = signature;
        self.is_complete = true;
    }
}

/// Accumulated state of a single tool call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCallSnapshot {
    pub id: String,
    pub name: String,
    pub arguments: String,
    pub is_complete: bool,
}

impl ToolCallSnapshot {
    /// Start tracking a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments: String::new(),
            is_complete: false,
        }
    }

    /// Append a delta to the accumulated JSON arguments.
    pub fn append_arguments(&mut self, delta: &str) {
        self.arguments.push_str(delta);
    }

    /// Mark the tool call complete with its final arguments string.
    pub fn complete(&mut self, arguments: String) {
        self.arguments = arguments;
        self.is_complete = true;
    }

    /// Parse the accumulated arguments as JSON.
    ///
    /// Valid even while streaming is in progress, since arguments are
    /// accumulated as a raw string until a complete JSON object is formed.
    pub fn parsed_arguments(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.arguments).ok()
    }
}

/// Accumulated view of a streaming response as events are processed.
#[derive(Debug, Clone, Default)]
pub struct StreamSnapshot {
    pub id: Option<String>,
    pub model: String,
    pub text: String,
    pub thinking: Option<ThinkingSnapshot>,
    pub tool_calls: Vec<ToolCallSnapshot>,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<FinishReason>,
    pub is_complete: bool,
}

impl StreamSnapshot {
    /// Create an empty, in-progress snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any assistant text has accumulated.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }

    /// Whether a thinking block has started.
    pub fn has_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    /// Whether any tool calls have started.
    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }

    /// Tool calls that have finished streaming their arguments.
    pub fn completed_tool_calls(&self) -> Vec<&ToolCallSnapshot> {
        self.tool_calls.iter().filter(|tc| tc.is_complete).collect()
    }

    /// Tool calls still receiving argument deltas.
    pub fn pending_tool_calls(&self) -> Vec<&ToolCallSnapshot> {
        self.tool_calls
            .iter()
            .filter(|tc| !tc.is_complete)
            .collect()
    }

    /// Completed tool calls converted to [`ToolCall`]s with parsed arguments.
    pub fn to_tool_calls(&self) -> Vec<ToolCall> {
        self.completed_tool_calls()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id.clone(),
                name: tc.name.clone(),
                arguments: tc.parsed_arguments().unwrap_or(serde_json::Value::Null),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "snapshot.test.rs"]
mod tests;
