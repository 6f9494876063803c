//! Tracked messages: the conversation-history wrapper around a provider [`Message`].
//!
//! A [`TrackedMessage`] pairs a wire-format `Message` with bookkeeping the
//! history store needs but the provider doesn't care about: which turn it
//! belongs to, where it came from, whether it has been tombstoned by
//! compaction, and whether it is "meta" (a reminder injected into the
//! transcript rather than something the user or model actually said).

use hyper_sdk::ContentBlock;
use hyper_sdk::Message;
use hyper_sdk::Role;
use hyper_sdk::ToolCall;
use uuid::Uuid;

/// Where a tracked message came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageSource {
    /// Typed or pasted by the user.
    User,
    /// Produced by the model.
    Assistant {
        /// The provider's request/response id, when known.
        request_id: Option<String>,
    },
    /// A tool result being fed back to the model.
    Tool {
        /// The tool call id this result answers.
        call_id: String,
    },
    /// A system-reminder block injected into the transcript.
    SystemReminder {
        /// Discriminator for the kind of reminder (e.g. `"changed_files"`).
        reminder_type: String,
    },
    /// Output from a subagent run, folded back into the parent conversation.
    Subagent {
        /// Id of the subagent that produced this message.
        agent_id: String,
    },
    /// A synthetic message summarizing turns removed by compaction.
    CompactionSummary,
}

impl MessageSource {
    /// Build an [`MessageSource::Assistant`] source.
    pub fn assistant(request_id: Option<String>) -> Self {
        MessageSource::Assistant { request_id }
    }

    /// Build a [`MessageSource::Tool`] source.
    pub fn tool(call_id: impl Into<String>) -> Self {
        MessageSource::Tool {
            call_id: call_id.into(),
        }
    }

    /// Build a [`MessageSource::Subagent`] source.
    pub fn subagent(agent_id: impl Into<String>) -> Self {
        MessageSource::Subagent {
            agent_id: agent_id.into(),
        }
    }
}

/// A message plus the bookkeeping the history store needs.
#[derive(Debug, Clone)]
pub struct TrackedMessage {
    /// Unique id for this message, stable across clones.
    pub uuid: String,
    /// The wire-format message.
    pub inner: Message,
    /// The turn this message belongs to.
    pub turn_id: String,
    /// Where this message came from.
    pub source: MessageSource,
    /// Whether compaction has removed this message from the active context.
    tombstoned: bool,
    /// Whether this message is a reminder rather than real conversation content.
    meta: bool,
}

impl TrackedMessage {
    /// Wrap a message with its turn and source, generating a fresh uuid.
    pub fn new(inner: Message, turn_id: impl Into<String>, source: MessageSource) -> Self {
        Self {
            uuid: Uuid::new_v4().to_string(),
            inner,
            turn_id: turn_id.into(),
            source,
            tombstoned: false,
            meta: false,
        }
    }

    /// Like [`TrackedMessage::new`] but marked as meta from construction.
    pub fn new_meta(inner: Message, turn_id: impl Into<String>, source: MessageSource) -> Self {
        let mut msg = Self::new(inner, turn_id, source);
        msg.meta = true;
        msg
    }

    /// Create a plain-text user message.
    pub fn user(text: impl Into<String>, turn_id: impl Into<String>) -> Self {
        Self::new(Message::user(text), turn_id, MessageSource::User)
    }

    /// Create a plain-text assistant message.
    pub fn assistant(
        text: impl Into<String>,
        turn_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::new(
            Message::assistant(text),
            turn_id,
            MessageSource::assistant(request_id),
        )
    }

    /// Create an assistant message from content blocks (e.g. including tool uses).
    pub fn assistant_with_content(
        content: Vec<ContentBlock>,
        turn_id: impl Into<String>,
        request_id: Option<String>,
    ) -> Self {
        Self::new(
            Message::new(Role::Assistant, content),
            turn_id,
            MessageSource::assistant(request_id),
        )
    }

    /// Create a plain-text system message.
    pub fn system(text: impl Into<String>, turn_id: impl Into<String>) -> Self {
        Self::new(Message::system(text), turn_id, MessageSource::User)
    }

    /// Create a system-reminder message. These are sent to the model as user
    /// content but marked meta so history and compaction can treat them
    /// differently from real user turns.
    pub fn system_reminder(
        text: impl Into<String>,
        reminder_type: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        Self::new_meta(
            Message::user(text),
            turn_id,
            MessageSource::SystemReminder {
                reminder_type: reminder_type.into(),
            },
        )
    }

    /// Create a successful tool-result message.
    pub fn tool_result(
        call_id: impl Into<String>,
        text: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        Self::new(
            Message::tool_result(&call_id, hyper_sdk::ToolResultContent::Text(text.into())),
            turn_id,
            MessageSource::tool(call_id),
        )
    }

    /// Create a failed tool-result message.
    pub fn tool_error(
        call_id: impl Into<String>,
        error: impl Into<String>,
        turn_id: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        Self::new(
            Message::tool_error(&call_id, error),
            turn_id,
            MessageSource::tool(call_id),
        )
    }

    /// The message's role.
    pub fn role(&self) -> Role {
        self.inner.role
    }

    /// All text content concatenated.
    pub fn text(&self) -> String {
        self.inner.text()
    }

    /// Whether compaction has tombstoned this message.
    pub fn is_tombstoned(&self) -> bool {
        self.tombstoned
    }

    /// Mark this message as removed from the active context by compaction.
    pub fn tombstone(&mut self) {
        self.tombstoned = true;
    }

    /// Whether this message contains one or more tool-use blocks.
    pub fn has_tool_calls(&self) -> bool {
        self.inner
            .content
            .iter()
            .any(|block| matches!(block, ContentBlock::ToolUse { .. }))
    }

    /// Extract the tool calls requested by this message, if any.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.inner
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolCall::new(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Whether this is a meta message (a reminder, not real conversation content).
    pub fn is_meta(&self) -> bool {
        self.meta
    }

    /// Set whether this message is meta.
    pub fn set_meta(&mut self, meta: bool) {
        self.meta = meta;
    }
}

impl From<TrackedMessage> for Message {
    fn from(tracked: TrackedMessage) -> Self {
        tracked.inner
    }
}

#[cfg(test)]
#[path = "tracked.test.rs"]
mod tests;
