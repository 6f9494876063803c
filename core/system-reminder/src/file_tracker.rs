//! Tracks which files the agent has read this session, so the
//! already-read-file and nested-memory-trigger reminders can be generated
//! without re-reading the file.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::SystemTime;

/// Snapshot of a file the agent has read.
#[derive(Debug, Clone)]
pub struct ReadFileState {
    /// The file's content as last read (full read) or the slice read (partial read).
    pub content: String,
    /// The file's mtime at read time, if known.
    pub last_modified: Option<SystemTime>,
    /// Monotonic read counter, used to order repeated reads of the same file.
    pub read_count: u32,
    /// Byte offset the partial read started at, if this was a partial read.
    offset: Option<i64>,
    /// Number of bytes read, if this was a partial read.
    limit: Option<i64>,
}

impl ReadFileState {
    /// Record a full-file read.
    pub fn new(content: String, last_modified: Option<SystemTime>, read_count: u32) -> Self {
        Self {
            content,
            last_modified,
            read_count,
            offset: None,
            limit: None,
        }
    }

    /// Record a partial read (offset/limit into the file).
    pub fn partial(
        content: String,
        last_modified: Option<SystemTime>,
        read_count: u32,
        offset: i64,
        limit: i64,
    ) -> Self {
        Self {
            content,
            last_modified,
            read_count,
            offset: Some(offset),
            limit: Some(limit),
        }
    }

    /// Whether this read covered only part of the file.
    pub fn is_partial(&self) -> bool {
        self.offset.is_some()
    }
}

fn is_nested_memory_file(path: &str) -> bool {
    path.ends_with("CLAUDE.md") || path.ends_with("AGENTS.md")
}

/// Tracks file reads for the lifetime of a session.
///
/// Interior-mutable so it can be shared behind an `Arc` across generators
/// without each caller needing a `&mut` borrow.
#[derive(Debug, Default)]
pub struct FileTracker {
    state: Mutex<FileTrackerState>,
}

#[derive(Debug, Default)]
struct FileTrackerState {
    files: HashMap<String, ReadFileState>,
    nested_memory_triggers: HashSet<String>,
}

impl FileTracker {
    /// Build an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a read of `path`. Returns whether this read should trigger a
    /// nested-memory reminder (i.e. `path` is a CLAUDE.md/AGENTS.md file
    /// being seen for the first time this call).
    pub fn track_read(&self, path: &str, state: ReadFileState) -> bool {
        let mut guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.files.insert(path.to_string(), state);

        if is_nested_memory_file(path) {
            guard.nested_memory_triggers.insert(path.to_string());
            true
        } else {
            false
        }
    }

    /// The last-known state for `path`, if it has been read.
    pub fn get_state(&self, path: &str) -> Option<ReadFileState> {
        let guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.files.get(path).cloned()
    }

    /// Every path tracked so far.
    pub fn tracked_files(&self) -> Vec<String> {
        let guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.files.keys().cloned().collect()
    }

    /// Stop tracking `path`.
    pub fn remove(&self, path: &str) {
        let mut guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.files.remove(path);
        guard.nested_memory_triggers.remove(path);
    }

    /// Whether any nested-memory trigger is pending.
    pub fn has_nested_memory_triggers(&self) -> bool {
        let guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        !guard.nested_memory_triggers.is_empty()
    }

    /// Take and clear the pending nested-memory triggers.
    pub fn drain_nested_memory_triggers(&self) -> Vec<String> {
        let mut guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.nested_memory_triggers.drain().collect()
    }

    /// Drop all tracked state.
    pub fn clear(&self) {
        let mut guard = self.state.lock().unwrap_or_else(|poison| poison.into_inner());
        guard.files.clear();
        guard.nested_memory_triggers.clear();
    }
}

#[cfg(test)]
#[path = "file_tracker.test.rs"]
mod tests;
