//! The in-memory conversation history: a system message, a sequence of
//! turns, and the bookkeeping compaction needs to know when and how much it
//! has already summarized away.

use crate::tracked::TrackedMessage;
use crate::turn::Turn;
use tessera_protocol::TokenUsage;

/// Tunables controlling when and how history gets compacted.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryConfig {
    /// Context window of the target model, in tokens.
    pub context_window: u32,
    /// Fraction of `context_window` usage that triggers compaction.
    pub compaction_threshold: f64,
    /// Maximum number of turns to retain before compaction kicks in.
    pub max_turns: i32,
    /// Whether compaction may run automatically when thresholds are crossed.
    pub auto_compact: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            context_window: 200_000,
            compaction_threshold: 0.8,
            max_turns: 1_000,
            auto_compact: false,
        }
    }
}

/// Marks where compaction last collapsed history, so later turns know what
/// has already been summarized.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactionBoundary {
    /// Id of the turn the compaction summary was attached to.
    pub turn_id: String,
    /// Ordinal of that turn at the time compaction ran.
    pub turn_number: i32,
    /// How many turns were folded into the summary.
    pub turns_compacted: usize,
    /// Estimated tokens freed by the compaction.
    pub tokens_saved: i64,
    /// Wall-clock time compaction ran, in epoch milliseconds.
    pub timestamp_ms: i64,
}

/// The conversation so far: an optional system message and a sequence of turns.
#[derive(Debug, Clone)]
pub struct MessageHistory {
    /// Compaction and retention settings for this history.
    pub config: HistoryConfig,
    /// The system message, if one has been set.
    pub system_message: Option<TrackedMessage>,
    turns: Vec<Turn>,
    compacted_summary: Option<String>,
    compaction_boundary: Option<CompactionBoundary>,
}

impl MessageHistory {
    /// Build an empty history with default settings.
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    /// Build an empty history with explicit settings.
    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            config,
            system_message: None,
            turns: Vec::new(),
            compacted_summary: None,
            compaction_boundary: None,
        }
    }

    /// Set or replace the system message.
    pub fn set_system_message(&mut self, message: TrackedMessage) {
        self.system_message = Some(message);
    }

    /// Number of turns currently retained.
    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    /// The most recently added turn, if any.
    pub fn current_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The most recently added turn, mutably.
    pub fn current_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut()
    }

    /// Append a completed or in-progress turn.
    pub fn add_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns retained, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Flatten the history into the message list a provider request expects:
    /// system message first, then each turn's user message, assistant reply,
    /// and any tool-result messages, skipping tombstoned content.
    pub fn messages_for_api(&self) -> Vec<hyper_sdk::Message> {
        let mut messages = Vec::new();

        if let Some(system) = &self.system_message {
            if !system.is_tombstoned() {
                messages.push(system.inner.clone());
            }
        }

        for turn in &self.turns {
            if !turn.user_message.is_tombstoned() {
                messages.push(turn.user_message.inner.clone());
            }
            if let Some(assistant) = &turn.assistant_message {
                if !assistant.is_tombstoned() {
                    messages.push(assistant.inner.clone());
                }
            }
        }

        messages
    }

    /// Total token usage accumulated across every retained turn.
    pub fn total_usage(&self) -> TokenUsage {
        let mut total = TokenUsage::default();
        for turn in &self.turns {
            total.input_tokens += turn.usage.input_tokens;
            total.output_tokens += turn.usage.output_tokens;
        }
        total
    }

    /// Collapse all but the last `keep_n` turns into a summary.
    ///
    /// `marker_turn_id` identifies the turn the summary is anchored to (for
    /// display), and `tokens_saved` is the estimated reduction compaction
    /// achieved.
    pub fn apply_compaction(
        &mut self,
        summary: String,
        keep_n: i32,
        marker_turn_id: impl Into<String>,
        tokens_saved: i64,
    ) {
        let keep_n = keep_n.max(0) as usize;
        let turn_number = self.turns.len() as i32;
        let turns_compacted = self.turns.len().saturating_sub(keep_n);

        if keep_n < self.turns.len() {
            self.turns = self.turns.split_off(self.turns.len() - keep_n);
        }

        self.compacted_summary = Some(summary);
        self.compaction_boundary = Some(CompactionBoundary {
            turn_id: marker_turn_id.into(),
            turn_number,
            turns_compacted,
            tokens_saved,
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
        });
    }

    /// The current compaction summary, if compaction has run.
    pub fn compacted_summary(&self) -> Option<&String> {
        self.compacted_summary.as_ref()
    }

    /// The boundary marking the last compaction, if any.
    pub fn compaction_boundary(&self) -> Option<&CompactionBoundary> {
        self.compaction_boundary.as_ref()
    }

    /// Whether history has grown past the configured retention thresholds.
    pub fn needs_compaction(&self) -> bool {
        if !self.config.auto_compact {
            return false;
        }

        if self.turns.len() as i32 > self.config.max_turns {
            return true;
        }

        let usage = self.total_usage();
        let budget = (self.config.context_window as f64) * self.config.compaction_threshold;
        usage.total() as f64 > budget
    }

    /// Drop every turn and any compaction bookkeeping, keeping the system message.
    pub fn clear(&mut self) {
        self.turns.clear();
        self.compacted_summary = None;
        self.compaction_boundary = None;
    }
}

impl Default for MessageHistory {
    fn default() -> Self {
        Self::new()
    }
}

/// Fluent builder for [`MessageHistory`].
#[derive(Debug, Clone, Default)]
pub struct HistoryBuilder {
    config: HistoryConfig,
    system_message: Option<String>,
}

impl HistoryBuilder {
    /// Start building a history with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target model's context window.
    pub fn context_window(mut self, tokens: u32) -> Self {
        self.config.context_window = tokens;
        self
    }

    /// Set the fraction of the context window that triggers compaction.
    pub fn compaction_threshold(mut self, threshold: f64) -> Self {
        self.config.compaction_threshold = threshold;
        self
    }

    /// Set the maximum number of turns retained before compaction.
    pub fn max_turns(mut self, max_turns: i32) -> Self {
        self.config.max_turns = max_turns;
        self
    }

    /// Set the system message text.
    pub fn system_message(mut self, text: impl Into<String>) -> Self {
        self.system_message = Some(text.into());
        self
    }

    /// Build the configured history.
    pub fn build(self) -> MessageHistory {
        let mut history = MessageHistory::with_config(self.config);
        if let Some(text) = self.system_message {
            history.set_system_message(TrackedMessage::system(text, "system"));
        }
        history
    }
}

#[cfg(test)]
#[path = "history.test.rs"]
mod tests;
