//! Core value types for system reminders: the attachment catalog, the XML
//! wrapper tags reminders are rendered into, and the reminder/message shapes
//! generators produce.

use std::fmt;

use crate::xml::wrap_with_tag;

/// XML tag a reminder's content gets wrapped in when injected as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlTag {
    /// `<system-reminder>`.
    SystemReminder,
    /// `<system-notification>`.
    SystemNotification,
    /// `<new-diagnostics>`.
    NewDiagnostics,
    /// `<session-memory>`.
    SessionMemory,
    /// Not wrapped at all (e.g. multi-message reminders).
    None,
}

impl XmlTag {
    /// The bare tag name, or `None` if this reminder isn't text-wrapped.
    pub fn tag_name(&self) -> Option<&'static str> {
        match self {
            XmlTag::SystemReminder => Some("system-reminder"),
            XmlTag::SystemNotification => Some("system-notification"),
            XmlTag::NewDiagnostics => Some("new-diagnostics"),
            XmlTag::SessionMemory => Some("session-memory"),
            XmlTag::None => None,
        }
    }
}

/// When a reminder is allowed to fire: every agent turn, main-agent turns
/// only, or only in response to a fresh user prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderTier {
    /// Fires for any agent (main or subagent).
    Core,
    /// Fires only for the main agent.
    MainAgentOnly,
    /// Fires only right after a new user prompt.
    UserPrompt,
}

/// Every kind of system reminder the orchestrator can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentType {
    /// Files changed on disk since last observed.
    ChangedFiles,
    /// A CLAUDE.md/AGENTS.md memory file was just read.
    NestedMemory,
    /// Entering plan mode.
    PlanModeEnter,
    /// An approved plan was submitted.
    PlanModeApproved,
    /// Exiting plan mode.
    PlanModeExit,
    /// Reminder to use the plan-writing tool.
    PlanToolReminder,
    /// The current plan needs re-verification.
    PlanVerification,
    /// Queued slash commands waiting to run.
    QueuedCommands,
    /// The session has a delegate/subagent mode active.
    DelegateMode,
    /// LSP diagnostics for recently touched files.
    LspDiagnostics,
    /// Outstanding todo items.
    TodoReminders,
    /// A file has already been read this session.
    AlreadyReadFile,
    /// Files referenced via `@mention` in the user prompt.
    AtMentionedFiles,
    /// Agents mentioned via `@agent` in the user prompt.
    AgentMentions,
    /// Skills available for this session.
    AvailableSkills,
    /// Skills that have already been invoked this session.
    InvokedSkills,
    /// Cumulative spend for the session, in USD.
    BudgetUsd,
    /// Cumulative token usage for the session.
    TokenUsage,
    /// The active output style's custom instructions.
    OutputStyle,
    /// Notifications from collaborators in a shared session.
    CollabNotifications,
    /// Pointer to content dropped during compaction.
    CompactFileReference,
    /// Security guidance for the active tool set.
    SecurityGuidelines,
    /// A background task finished or changed state.
    BackgroundTask,
    /// Additional context supplied by a hook.
    HookAdditionalContext,
    /// A hook blocked the in-flight action.
    HookBlockingError,
    /// An asynchronous hook finished and reported a result.
    AsyncHookResponse,
    /// Session memory content recalled for this turn.
    SessionMemoryContent,
}

impl AttachmentType {
    /// Snake_case identifier, stable across releases (used for telemetry keys).
    pub fn name(&self) -> &'static str {
        match self {
            AttachmentType::ChangedFiles => "changed_files",
            AttachmentType::NestedMemory => "nested_memory",
            AttachmentType::PlanModeEnter => "plan_mode_enter",
            AttachmentType::PlanModeApproved => "plan_mode_approved",
            AttachmentType::PlanModeExit => "plan_mode_exit",
            AttachmentType::PlanToolReminder => "plan_tool_reminder",
            AttachmentType::PlanVerification => "plan_verification",
            AttachmentType::QueuedCommands => "queued_commands",
            AttachmentType::DelegateMode => "delegate_mode",
            AttachmentType::LspDiagnostics => "lsp_diagnostics",
            AttachmentType::TodoReminders => "todo_reminders",
            AttachmentType::AlreadyReadFile => "already_read_file",
            AttachmentType::AtMentionedFiles => "at_mentioned_files",
            AttachmentType::AgentMentions => "agent_mentions",
            AttachmentType::AvailableSkills => "available_skills",
            AttachmentType::InvokedSkills => "invoked_skills",
            AttachmentType::BudgetUsd => "budget_usd",
            AttachmentType::TokenUsage => "token_usage",
            AttachmentType::OutputStyle => "output_style",
            AttachmentType::CollabNotifications => "collab_notifications",
            AttachmentType::CompactFileReference => "compact_file_reference",
            AttachmentType::SecurityGuidelines => "security_guidelines",
            AttachmentType::BackgroundTask => "background_task",
            AttachmentType::HookAdditionalContext => "hook_additional_context",
            AttachmentType::HookBlockingError => "hook_blocking_error",
            AttachmentType::AsyncHookResponse => "async_hook_response",
            AttachmentType::SessionMemoryContent => "session_memory_content",
        }
    }

    /// When this reminder is allowed to fire.
    pub fn tier(&self) -> ReminderTier {
        match self {
            AttachmentType::ChangedFiles
            | AttachmentType::NestedMemory
            | AttachmentType::PlanModeEnter
            | AttachmentType::PlanModeExit
            | AttachmentType::QueuedCommands
            | AttachmentType::DelegateMode
            | AttachmentType::HookAdditionalContext
            | AttachmentType::HookBlockingError
            | AttachmentType::AsyncHookResponse
            | AttachmentType::SessionMemoryContent
            | AttachmentType::CompactFileReference => ReminderTier::Core,

            AttachmentType::AtMentionedFiles | AttachmentType::AgentMentions => {
                ReminderTier::UserPrompt
            }

            AttachmentType::PlanModeApproved
            | AttachmentType::PlanToolReminder
            | AttachmentType::PlanVerification
            | AttachmentType::LspDiagnostics
            | AttachmentType::TodoReminders
            | AttachmentType::AlreadyReadFile
            | AttachmentType::AvailableSkills
            | AttachmentType::InvokedSkills
            | AttachmentType::BudgetUsd
            | AttachmentType::TokenUsage
            | AttachmentType::OutputStyle
            | AttachmentType::CollabNotifications
            | AttachmentType::SecurityGuidelines
            | AttachmentType::BackgroundTask => ReminderTier::MainAgentOnly,
        }
    }

    /// XML tag this attachment's text is wrapped in, when it is text at all.
    pub fn xml_tag(&self) -> XmlTag {
        match self {
            AttachmentType::LspDiagnostics => XmlTag::NewDiagnostics,
            AttachmentType::SessionMemoryContent => XmlTag::SessionMemory,
            AttachmentType::HookBlockingError | AttachmentType::AsyncHookResponse => {
                XmlTag::SystemNotification
            }
            AttachmentType::AlreadyReadFile => XmlTag::None,
            _ => XmlTag::SystemReminder,
        }
    }
}

impl fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Who a synthetic reminder message is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// Assistant-authored (e.g. a synthetic tool_use).
    Assistant,
    /// User-authored (e.g. a synthetic tool_result).
    User,
}

/// A content block within a synthetic reminder message.
///
/// Deliberately simpler than the provider wire format: reminders only ever
/// need plain text, a synthetic tool call, or a synthetic tool result.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    /// Plain text.
    Text {
        /// The text.
        text: String,
    },
    /// A synthetic tool call.
    ToolUse {
        /// Id of the call.
        id: String,
        /// Tool name.
        name: String,
        /// Tool arguments.
        input: serde_json::Value,
    },
    /// A synthetic tool result.
    ToolResult {
        /// Id of the call this answers.
        tool_use_id: String,
        /// Result content.
        content: String,
    },
}

impl ContentBlock {
    /// Build a text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Build a tool-use block.
    pub fn tool_use(id: impl Into<String>, name: impl Into<String>, input: serde_json::Value) -> Self {
        ContentBlock::ToolUse {
            id: id.into(),
            name: name.into(),
            input,
        }
    }

    /// Build a tool-result block.
    pub fn tool_result(tool_use_id: impl Into<String>, content: impl Into<String>) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content: content.into(),
        }
    }
}

/// A single synthetic message within a multi-message reminder.
#[derive(Debug, Clone)]
pub struct ReminderMessage {
    /// Who the message is attributed to.
    pub role: MessageRole,
    /// Content blocks making up the message.
    pub blocks: Vec<ContentBlock>,
    /// Whether this message is metadata (hidden from the user transcript).
    pub is_meta: bool,
}

impl ReminderMessage {
    /// Build an assistant-authored message.
    pub fn assistant(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: MessageRole::Assistant,
            blocks,
            is_meta: true,
        }
    }

    /// Build a user-authored message.
    pub fn user(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: MessageRole::User,
            blocks,
            is_meta: true,
        }
    }
}

/// The payload a generator produces: either a single text blob to wrap and
/// inject, or a sequence of synthetic messages (for tool_use/tool_result
/// style reminders).
#[derive(Debug, Clone)]
pub enum ReminderOutput {
    /// Plain text, to be wrapped in the attachment type's XML tag.
    Text(String),
    /// Synthetic messages, injected verbatim.
    Messages(Vec<ReminderMessage>),
}

impl ReminderOutput {
    /// The messages, if this output is the `Messages` variant.
    pub fn as_messages(&self) -> Option<&Vec<ReminderMessage>> {
        match self {
            ReminderOutput::Messages(msgs) => Some(msgs),
            _ => None,
        }
    }
}

/// A reminder produced by a generator, ready for the orchestrator to inject.
#[derive(Debug, Clone)]
pub struct SystemReminder {
    /// Which attachment type produced this reminder.
    pub attachment_type: AttachmentType,
    /// The tier this reminder's attachment type belongs to.
    pub tier: ReminderTier,
    /// Whether this reminder is metadata (hidden from the user transcript).
    pub is_meta: bool,
    /// The reminder's payload.
    pub output: ReminderOutput,
}

impl SystemReminder {
    /// Build a text reminder, marked as meta.
    pub fn new(attachment_type: AttachmentType, content: impl Into<String>) -> Self {
        Self::text(attachment_type, content)
    }

    /// Build a text reminder, marked as meta.
    pub fn text(attachment_type: AttachmentType, content: impl Into<String>) -> Self {
        Self {
            tier: attachment_type.tier(),
            attachment_type,
            is_meta: true,
            output: ReminderOutput::Text(content.into()),
        }
    }

    /// Build a multi-message reminder, marked as meta.
    pub fn messages(attachment_type: AttachmentType, messages: Vec<ReminderMessage>) -> Self {
        Self {
            tier: attachment_type.tier(),
            attachment_type,
            is_meta: true,
            output: ReminderOutput::Messages(messages),
        }
    }

    /// Whether this reminder carries plain text.
    pub fn is_text(&self) -> bool {
        matches!(self.output, ReminderOutput::Text(_))
    }

    /// Whether this reminder carries synthetic messages.
    pub fn is_messages(&self) -> bool {
        matches!(self.output, ReminderOutput::Messages(_))
    }

    /// The raw text content, if this is a text reminder.
    pub fn content(&self) -> Option<&str> {
        match &self.output {
            ReminderOutput::Text(text) => Some(text),
            ReminderOutput::Messages(_) => None,
        }
    }

    /// The XML tag this reminder's attachment type wraps text in.
    pub fn xml_tag(&self) -> XmlTag {
        self.attachment_type.xml_tag()
    }

    /// The text content wrapped in its XML tag, if this is a text reminder.
    pub fn wrapped_content(&self) -> Option<String> {
        self.content().map(|text| wrap_with_tag(text, self.xml_tag()))
    }
}

#[cfg(test)]
#[path = "types.test.rs"]
mod tests;
