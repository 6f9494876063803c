//! Conversation message tracking, normalization, and history.
//!
//! This crate owns the shapes that sit between the provider wire format
//! (`hyper_sdk::Message`) and the turn loop: [`TrackedMessage`] adds the
//! bookkeeping history needs, [`Turn`] groups a user message with the
//! assistant's reply and any tool calls made along the way, and
//! [`MessageHistory`] retains turns until compaction collapses them.

pub mod factory;
pub mod history;
pub mod normalization;
pub mod tracked;
pub mod turn;
pub mod type_guards;

pub use history::CompactionBoundary;
pub use history::HistoryBuilder;
pub use history::HistoryConfig;
pub use history::MessageHistory;
pub use tracked::MessageSource;
pub use tracked::TrackedMessage;
pub use turn::AbortReason;
pub use turn::ToolCallStatus;
pub use turn::TrackedToolCall;
pub use turn::Turn;
