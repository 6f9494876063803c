//! Cross-call provenance and auto-compaction bookkeeping.

use serde::Deserialize;
use serde::Serialize;
use std::time::SystemTime;

/// Tracks a chain of related queries (e.g. a subagent spawned from a parent
/// turn), for tracing and depth limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTracking {
    /// Shared ID for every query in this chain.
    pub chain_id: String,
    /// Depth from the root query (root is 0).
    pub depth: u32,
    /// ID of the query that spawned this one, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_query_id: Option<String>,
}

impl QueryTracking {
    /// Start a new chain at the root.
    pub fn new_root(chain_id: impl Into<String>) -> Self {
        Self {
            chain_id: chain_id.into(),
            depth: 0,
            parent_query_id: None,
        }
    }

    /// Whether this is the root query of its chain.
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Derive tracking for a child query spawned from this one.
    pub fn child(&self, parent_query_id: impl Into<String>) -> Self {
        Self {
            chain_id: self.chain_id.clone(),
            depth: self.depth + 1,
            parent_query_id: Some(parent_query_id.into()),
        }
    }
}

/// Bookkeeping for auto-compaction and session-memory extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AutoCompactTracking {
    /// Whether the history has been auto-compacted at least once.
    pub compacted: bool,
    /// Turn ID at which the last compaction happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_id: Option<String>,
    /// Turn counter value at the last compaction.
    pub turn_counter: u32,
    /// Number of memory extractions performed.
    pub extraction_count: u32,
    /// Whether an extraction is currently in progress.
    pub extraction_in_progress: bool,
    /// Number of tool calls made since the last extraction.
    pub tool_call_count: u32,
    /// Tool call count recorded at the last completed extraction.
    pub last_extraction_tool_calls: u32,
    /// Token count recorded at the last completed extraction.
    pub last_extraction_tokens: i64,
    /// ID of the message produced by the last completed extraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_extraction_id: Option<String>,
    /// Wall-clock time the last completed extraction finished at.
    #[serde(skip)]
    pub last_extraction_at: Option<SystemTime>,
}

impl AutoCompactTracking {
    /// Build fresh tracking state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark that compaction happened at `turn_id`/`turn_counter`.
    pub fn mark_compacted(&mut self, turn_id: impl Into<String>, turn_counter: u32) {
        self.compacted = true;
        self.turn_id = Some(turn_id.into());
        self.turn_counter = turn_counter;
    }

    /// Reset compaction state (e.g. after starting a fresh session).
    pub fn reset(&mut self) {
        self.compacted = false;
        self.turn_id = None;
        self.turn_counter = 0;
    }

    /// Record that a tool call happened.
    pub fn record_tool_call(&mut self) {
        self.tool_call_count += 1;
    }

    /// Mark that an extraction has started.
    pub fn mark_extraction_started(&mut self) {
        self.extraction_in_progress = true;
    }

    /// Mark that the in-progress extraction completed successfully.
    pub fn mark_extraction_completed(&mut self, tokens: i64, extraction_id: impl Into<String>) {
        self.extraction_in_progress = false;
        self.extraction_count += 1;
        self.last_extraction_tokens = tokens;
        self.last_extraction_tool_calls = self.tool_call_count;
        self.last_extraction_id = Some(extraction_id.into());
        self.last_extraction_at = Some(SystemTime::now());
    }

    /// Time elapsed since the last completed extraction. Treated as having
    /// just happened if no extraction has completed yet, so callers relying
    /// on a cooldown don't fire prematurely against `UNIX_EPOCH`.
    pub fn time_since_extraction(&self) -> std::time::Duration {
        match self.last_extraction_at {
            Some(at) => SystemTime::now()
                .duration_since(at)
                .unwrap_or(std::time::Duration::ZERO),
            None => std::time::Duration::ZERO,
        }
    }

    /// Mark that the in-progress extraction failed; counters are not advanced.
    pub fn mark_extraction_failed(&mut self) {
        self.extraction_in_progress = false;
    }

    /// Tokens consumed since the last completed extraction.
    pub fn tokens_since_extraction(&self, current_tokens: i64) -> i64 {
        current_tokens - self.last_extraction_tokens
    }

    /// Tool calls made since the last completed extraction.
    pub fn tool_calls_since_extraction(&self) -> u32 {
        self.tool_call_count - self.last_extraction_tool_calls
    }
}

/// Record of a single file read, with access bookkeeping for
/// already-read-file reminders.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReadInfo {
    /// File content as last read (full read) or the slice read (partial read).
    pub content: String,
    /// mtime at read time.
    pub last_modified: SystemTime,
    /// Number of times this file has been read.
    pub access_count: u32,
    /// Whether this read covered the whole file.
    pub is_complete_read: bool,
    /// Byte offset the partial read started at, if partial.
    pub offset: Option<i64>,
    /// Number of bytes read, if partial.
    pub limit: Option<i64>,
}

impl FileReadInfo {
    /// Record a full-file read.
    pub fn new(content: impl Into<String>, last_modified: SystemTime) -> Self {
        Self {
            content: content.into(),
            last_modified,
            access_count: 1,
            is_complete_read: true,
            offset: None,
            limit: None,
        }
    }

    /// Record a partial read (offset/limit into the file).
    pub fn partial(
        content: impl Into<String>,
        last_modified: SystemTime,
        offset: i64,
        limit: i64,
    ) -> Self {
        Self {
            content: content.into(),
            last_modified,
            access_count: 1,
            is_complete_read: false,
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Record another access to this file (re-read without content change).
    pub fn record_access(&mut self) {
        self.access_count += 1;
    }
}

/// Kind of change observed on a tracked file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileChangeType {
    Created,
    Modified,
    Deleted,
}

impl FileChangeType {
    /// Canonical snake_case string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FileChangeType::Created => "created",
            FileChangeType::Modified => "modified",
            FileChangeType::Deleted => "deleted",
        }
    }
}

/// An observed change to a tracked file, used to invalidate cached reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileChange {
    /// Path of the changed file.
    pub path: String,
    /// What happened to it.
    pub change_type: FileChangeType,
}

impl FileChange {
    /// Build a "modified" change.
    pub fn modified(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change_type: FileChangeType::Modified,
        }
    }

    /// Build a "deleted" change.
    pub fn deleted(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change_type: FileChangeType::Deleted,
        }
    }

    /// Build a "created" change.
    pub fn created(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            change_type: FileChangeType::Created,
        }
    }
}

#[cfg(test)]
#[path = "tracking.test.rs"]
mod tests;
