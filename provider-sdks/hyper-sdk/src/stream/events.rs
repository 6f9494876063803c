//! Raw streaming events emitted by a provider's wire protocol.

use crate::response::FinishReason;
use crate::response::TokenUsage;
use crate::tools::ToolCall;
use serde::Deserialize;
use serde::Serialize;

/// Error payload carried by [`StreamEvent::Error`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamErrorEvent {
    pub message: String,
}

/// A single decoded event from a provider's streaming response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The response object has been created; carries the response ID.
    ResponseCreated { id: String },
    /// A chunk of assistant text.
    TextDelta { index: i64, delta: String },
    /// A text content block is complete.
    TextDone { index: i64, text: String },
    /// A chunk of the model's extended-thinking content.
    ThinkingDelta { index: i64, delta: String },
    /// A thinking content block is complete.
    ThinkingDone {
        index: i64,
        content: String,
        signature: Option<String>,
    },
    /// A tool call has started; its arguments will arrive as deltas.
    ToolCallStart {
        index: i64,
        id: String,
        name: String,
    },
    /// A chunk of a tool call's JSON arguments.
    ToolCallDelta {
        index: i64,
        arguments_delta: String,
    },
    /// A tool call is complete, with fully-parsed arguments.
    ToolCallDone { index: i64, tool_call: ToolCall },
    /// The response is complete.
    ResponseDone {
        id: String,
        usage: Option<TokenUsage>,
        finish_reason: FinishReason,
        model: String,
    },
    /// The provider reported an error mid-stream.
    Error(StreamErrorEvent),
    /// An event the processor intentionally does not act on.
    Ignored,
}

impl StreamEvent {
    /// Build a [`StreamEvent::ResponseCreated`].
    pub fn response_created(id: impl Into<String>) -> Self {
        StreamEvent::ResponseCreated { id: id.into() }
    }

    /// Build a [`StreamEvent::TextDelta`].
    pub fn text_delta(index: i64, delta: impl Into<String>) -> Self {
        StreamEvent::TextDelta {
            index,
            delta: delta.into(),
        }
    }

    /// Build a [`StreamEvent::TextDone`].
    pub fn text_done(index: i64, text: impl Into<String>) -> Self {
        StreamEvent::TextDone {
            index,
            text: text.into(),
        }
    }

    /// Build a [`StreamEvent::ThinkingDelta`].
    pub fn thinking_delta(index: i64, delta: impl Into<String>) -> Self {
        StreamEvent::ThinkingDelta {
            index,
            delta: delta.into(),
        }
    }

    /// Build a [`StreamEvent::ThinkingDone`] with no signature.
    pub fn thinking_done(index: i64, content: impl Into<String>) -> Self {
        StreamEvent::ThinkingDone {
            index,
            content: content.into(),
            signature: None,
        }
    }

    /// Build a [`StreamEvent::ToolCallStart`].
    pub fn tool_call_start(index: i64, id: impl Into<String>, name: impl Into<String>) -> Self {
        StreamEvent::ToolCallStart {
            index,
            id: id.into(),
            name: name.into(),
        }
    }

    /// Build a [`StreamEvent::ToolCallDone`].
    pub fn tool_call_done(index: i64, tool_call: ToolCall) -> Self {
        StreamEvent::ToolCallDone { index, tool_call }
    }

    /// Build a [`StreamEvent::ResponseDone`].
    pub fn response_done(id: impl Into<String>, finish_reason: FinishReason) -> Self {
        StreamEvent::ResponseDone {
            id: id.into(),
            usage: None,
            finish_reason,
            model: String::new(),
        }
    }

    /// Whether this event carries incremental (delta) content.
    pub fn is_delta(&self) -> bool {
        matches!(
            self,
            StreamEvent::TextDelta { .. }
                | StreamEvent::ThinkingDelta { .. }
                | StreamEvent::ToolCallDelta { .. }
        )
    }

    /// Whether this event marks the end of the response.
    pub fn is_done(&self) -> bool {
        matches!(self, StreamEvent::ResponseDone { .. })
    }

    /// The text delta carried by this event, if any.
    pub fn as_text_delta(&self) -> Option<&str> {
        match self {
            StreamEvent::TextDelta { delta, .. } => Some(delta),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "events.test.rs"]
mod tests;
