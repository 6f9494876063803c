//! User-facing view of a [`StreamEvent`](super::StreamEvent), stripped of
//! wire-format detail that callers of [`StreamProcessor`](super::StreamProcessor)
//! don't need.

use crate::response::FinishReason;
use crate::response::TokenUsage;
use crate::tools::ToolCall;

use super::StreamEvent;

/// A single processed update handed to [`StreamProcessor`](super::StreamProcessor) callers.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamUpdate {
    /// The response started; carries its ID.
    Started { id: String },
    /// A chunk of assistant text.
    TextDelta { index: i64, delta: String },
    /// A chunk of extended-thinking content.
    ThinkingDelta { index: i64, delta: String },
    /// A tool call started streaming.
    ToolCallStarted {
        index: i64,
        id: String,
        name: String,
    },
    /// A tool call finished streaming.
    ToolCallFinished { index: i64, tool_call: ToolCall },
    /// The response is complete.
    Done {
        id: String,
        finish_reason: FinishReason,
        usage: Option<TokenUsage>,
    },
    /// An update with no effect on the accumulated response.
    Other,
}

impl StreamUpdate {
    /// Whether this update carries incremental content.
    pub fn is_delta(&self) -> bool {
        matches!(
            self,
            StreamUpdate::TextDelta { .. } | StreamUpdate::ThinkingDelta { .. }
        )
    }

    /// Whether this update is a [`StreamUpdate::TextDelta`].
    pub fn is_text_delta(&self) -> bool {
        matches!(self, StreamUpdate::TextDelta { .. })
    }

    /// Whether this update marks the end of the response.
    pub fn is_done(&self) -> bool {
        matches!(self, StreamUpdate::Done { .. })
    }

    /// The text delta carried by this update, if any.
    pub fn as_text_delta(&self) -> Option<&str> {
        match self {
            StreamUpdate::TextDelta { delta, .. } => Some(delta),
            _ => None,
        }
    }

    /// The thinking delta carried by this update, if any.
    pub fn as_thinking_delta(&self) -> Option<&str> {
        match self {
            StreamUpdate::ThinkingDelta { delta, .. } => Some(delta),
            _ => None,
        }
    }

    /// The finish reason, if this update is a [`StreamUpdate::Done`].
    pub fn finish_reason(&self) -> Option<FinishReason> {
        match self {
            StreamUpdate::Done { finish_reason, .. } => Some(*finish_reason),
            _ => None,
        }
    }
}

impl From<StreamEvent> for StreamUpdate {
    fn from(event: StreamEvent) -> Self {
        match event {
            StreamEvent::ResponseCreated { id } => StreamUpdate::Started { id },
            StreamEvent::TextDelta { index, delta } => StreamUpdate::TextDelta { index, delta },
            StreamEvent::ThinkingDelta { index, delta } => {
                StreamUpdate::ThinkingDelta { index, delta }
            }
            StreamEvent::ToolCallStart { index, id, name } => {
                StreamUpdate::ToolCallStarted { index, id, name }
            }
            StreamEvent::ToolCallDone { index, tool_call } => {
                StreamUpdate::ToolCallFinished { index, tool_call }
            }
            StreamEvent::ResponseDone {
                id,
                usage,
                finish_reason,
                ..
            } => StreamUpdate::Done {
                id,
                finish_reason,
                usage,
            },
            StreamEvent::TextDone { .. }
            | StreamEvent::ThinkingDone { .. }
            | StreamEvent::ToolCallDelta { .. }
            | StreamEvent::Error(_)
            | StreamEvent::Ignored => StreamUpdate::Other,
        }
    }
}

#[cfg(test)]
#[path = "update.test.rs"]
mod tests;
