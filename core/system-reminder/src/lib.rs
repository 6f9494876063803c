//! System reminders: small, model-facing notes injected into the
//! conversation to surface state the model wouldn't otherwise see (changed
//! files, diagnostics, plan-mode transitions, outstanding todos, ...).
//!
//! Generators implement [`generator::AttachmentGenerator`] and are driven by
//! [`orchestrator::SystemReminderOrchestrator`], which throttles and filters
//! them by [`types::ReminderTier`] before handing the results to
//! [`inject::create_injected_messages`].

pub mod config;
pub mod error;
pub mod file_tracker;
pub mod generator;
pub mod generators;
pub mod inject;
pub mod orchestrator;
pub mod parsing;
pub mod throttle;
pub mod types;
pub mod xml;

pub use config::SystemReminderConfig;
pub use error::Result;
pub use error::SystemReminderError;
pub use file_tracker::FileTracker;
pub use file_tracker::ReadFileState;
pub use generator::AttachmentGenerator;
pub use generator::GeneratorContext;
pub use inject::InjectedBlock;
pub use inject::InjectedMessage;
pub use inject::InjectionPosition;
pub use inject::create_injected_messages;
pub use inject::inject_reminders;
pub use orchestrator::SystemReminderOrchestrator;
pub use types::AttachmentType;
pub use types::ContentBlock;
pub use types::MessageRole;
pub use types::ReminderMessage;
pub use types::ReminderOutput;
pub use types::ReminderTier;
pub use types::SystemReminder;
pub use types::XmlTag;
pub use xml::extract_system_reminder;
pub use xml::has_system_reminder;
pub use xml::wrap_system_reminder;
pub use xml::wrap_with_tag;
