//! System prompt assembly from compile-time templates and conversation context.

pub mod builder;
pub mod engine;
pub mod error;
pub mod sections;
pub mod summarization;
pub mod templates;

pub use builder::SystemPromptBuilder;
pub use error::PromptError;
pub use error::Result;
pub use sections::PromptSection;
