//! Agent loop driver for multi-turn conversations with LLM providers.

mod compaction;
mod driver;
mod fallback;
mod result;
mod session_memory_agent;

pub use compaction::{
    CompactConfig, CompactionConfig, CompactionResult, CompactionTier, ContextRestoration,
    FileRestoration, InvokedSkillRestoration, KeepWindowResult, MessageInfo, SessionMemoryConfig,
    SessionMemorySummary, build_context_restoration, build_context_restoration_with_config,
    build_token_breakdown, calculate_keep_start_index, create_compact_boundary_message,
    create_invoked_skills_attachment, format_restoration_message, format_summary_with_transcript,
    map_message_index_to_keep_turns, micro_compact_candidates, should_compact,
    try_session_memory_compact, wrap_hook_additional_context, write_session_memory,
};

// Phase 2: Micro-compact execution and threshold status
pub use compaction::{
    CLEARED_CONTENT_MARKER, COMPACTABLE_TOOLS, CONTENT_PREVIEW_LENGTH, MicroCompactResult,
    TaskInfo, TaskStatusRestoration, ThresholdStatus, ToolResultCandidate,
    build_compact_instructions, execute_micro_compact, format_restoration_with_tasks,
};

// Re-export backwards-compatible constant names
pub use compaction::{
    CONTEXT_RESTORATION_BUDGET, CONTEXT_RESTORATION_MAX_FILES, MIN_MICRO_COMPACT_SAVINGS,
    RECENT_TOOL_RESULTS_TO_KEEP,
};
pub use driver::{AgentLoop, AgentLoopBuilder};
pub use fallback::{FallbackAttempt, FallbackConfig, FallbackState};
pub use result::{LoopResult, StopReason};
pub use session_memory_agent::{ExtractionResult, SessionMemoryExtractionAgent};

// Re-export LoopConfig and compaction-related configuration from tessera-protocol
pub use tessera_protocol::FileRestorationConfig;
pub use tessera_protocol::KeepWindowConfig;
pub use tessera_protocol::LoopConfig;
pub use tessera_protocol::SessionMemoryExtractionConfig;
