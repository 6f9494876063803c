//! Tool execution context.
//!
//! This module provides [`ToolContext`] which contains all the context
//! needed for tool execution, including permissions, event channels,
//! and cancellation support.

use futures::future::BoxFuture;
use tessera_protocol::{LoopEvent, PermissionMode};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use std::time::SystemTime;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

/// Stored approvals for tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApprovalStore {
    /// Approved tool patterns, possibly containing a trailing `*` wildcard.
    approved_patterns: HashMap<String, HashSet<String>>,
    /// Session-wide approvals.
    session_approvals: HashSet<String>,
}

impl ApprovalStore {
    /// Create a new empty approval store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a tool action is approved, either by exact match or by a
    /// previously approved wildcard pattern.
    pub fn is_approved(&self, tool_name: &str, pattern: &str) -> bool {
        if self.session_approvals.contains(tool_name) {
            return true;
        }
        match self.approved_patterns.get(tool_name) {
            Some(patterns) => patterns
                .iter()
                .any(|p| p == pattern || Self::matches_wildcard(p, pattern)),
            None => false,
        }
    }

    /// Whether `pattern` (which may end in `*`, or contain `"<prefix> *"`)
    /// matches `value`.
    pub fn matches_wildcard(pattern: &str, value: &str) -> bool {
        if pattern == "*" {
            return true;
        }
        match pattern.strip_suffix('*') {
            Some(prefix) => value.starts_with(prefix.trim_end()),
            None => pattern == value,
        }
    }

    /// Add an approval for a specific pattern.
    pub fn approve_pattern(&mut self, tool_name: &str, pattern: &str) {
        self.approved_patterns
            .entry(tool_name.to_string())
            .or_default()
            .insert(pattern.to_string());
    }

    /// Add a session-wide approval for a tool.
    pub fn approve_session(&mut self, tool_name: &str) {
        self.session_approvals.insert(tool_name.to_string());
    }

    /// Clear all approvals.
    pub fn clear(&mut self) {
        self.approved_patterns.clear();
        self.session_approvals.clear();
    }
}

/// Tracks files that have been read or modified.
#[derive(Debug, Clone, Default)]
pub struct FileTracker {
    /// Files that have been read.
    read_files: HashSet<PathBuf>,
    /// Files that have been modified.
    modified_files: HashSet<PathBuf>,
}

impl FileTracker {
    /// Create a new file tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file read.
    pub fn record_read(&mut self, path: impl Into<PathBuf>) {
        self.read_files.insert(path.into());
    }

    /// Record a file modification.
    pub fn record_modified(&mut self, path: impl Into<PathBuf>) {
        self.modified_files.insert(path.into());
    }

    /// Check if a file has been read.
    pub fn was_read(&self, path: &PathBuf) -> bool {
        self.read_files.contains(path)
    }

    /// Check if a file has been modified.
    pub fn was_modified(&self, path: &PathBuf) -> bool {
        self.modified_files.contains(path)
    }

    /// Get all read files.
    pub fn read_files(&self) -> &HashSet<PathBuf> {
        &self.read_files
    }

    /// Get all modified files.
    pub fn modified_files(&self) -> &HashSet<PathBuf> {
        &self.modified_files
    }
}

/// Snapshot of a file's content at the time it was read by a tool.
///
/// Used to detect whether a file has changed on disk between a `Read`
/// and a subsequent `Edit`/`SmartEdit` so the tool can refuse to write
/// over a concurrent modification it never saw.
#[derive(Debug, Clone)]
pub struct FileReadState {
    /// Hash of the file content as read (or of the read window, for partial
    /// reads), when a hash could be computed.
    pub content_hash: Option<String>,
    /// Modification time observed at read time, if the filesystem reported one.
    pub mtime: Option<SystemTime>,
    /// Whether the whole file was read (`true`) or only a window of lines (`false`).
    pub is_complete: bool,
}

impl FileReadState {
    /// Record a full-file read.
    pub fn complete(content: String, mtime: Option<SystemTime>) -> Self {
        Self {
            content_hash: Some(Self::compute_hash(&content)),
            mtime,
            is_complete: true,
        }
    }

    /// Record a windowed (offset/limit) read.
    ///
    /// The hash only covers the offset/limit window identity, not file
    /// content, since partial reads can't be used to detect drift in the
    /// untouched parts of the file.
    pub fn partial(offset: i32, limit: i32, mtime: Option<SystemTime>) -> Self {
        Self {
            content_hash: Some(Self::compute_hash(&format!("{offset}:{limit}"))),
            mtime,
            is_complete: false,
        }
    }

    /// SHA-256 hex digest of `content`.
    pub fn compute_hash(content: &str) -> String {
        use sha2::Digest;
        let mut hasher = sha2::Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// A skill invocation tracked for the lifetime of its execution.
#[derive(Debug, Clone)]
pub struct InvokedSkill {
    /// Name of the invoked skill.
    pub name: String,
    /// When the skill was invoked.
    pub started_at: Instant,
}

/// Request to approve a proposed tool action, handed to a
/// [`PermissionRequester`] for interactive approval.
pub type AgentCancelTokens = Arc<Mutex<HashMap<String, CancellationToken>>>;

/// Interactive approval flow for permission requests that need a human decision.
#[async_trait::async_trait]
pub trait PermissionRequester: Send + Sync {
    /// Present `request` to the user and return their decision.
    ///
    /// `worker_id` identifies which concurrent tool call is asking, for UIs
    /// that track multiple in-flight approval prompts.
    async fn request_permission(
        &self,
        request: tessera_protocol::ApprovalRequest,
        worker_id: &str,
    ) -> tessera_protocol::ApprovalDecision;
}

/// Input to a single-shot model call (used by SmartEdit's LLM correction fallback).
pub struct ModelCallInput {
    /// The structured-output request to send.
    pub request: hyper_sdk::ObjectRequest,
}

/// Result of a single-shot model call.
pub struct ModelCallResult {
    /// The model's structured response.
    pub response: hyper_sdk::ObjectResponse,
}

/// Callback for making a single-shot structured-output model call.
pub type ModelCallFn = Arc<
    dyn Fn(ModelCallInput) -> BoxFuture<'static, Result<ModelCallResult, String>> + Send + Sync,
>;

/// Input for spawning a subagent via the Task tool.
#[derive(Debug, Clone)]
pub struct SpawnAgentInput {
    /// Subagent type to spawn (matches a registered `AgentDefinition`).
    pub agent_type: String,
    /// The task prompt for the subagent.
    pub prompt: String,
    /// Optional model override.
    pub model: Option<String>,
    /// Optional max-turns override.
    pub max_turns: Option<i32>,
    /// Whether to run the agent in the background.
    pub run_in_background: bool,
    /// Optional tool allowlist override.
    pub allowed_tools: Option<Vec<String>>,
    /// Parent's model role selections, carried over for isolation.
    pub parent_selections: Option<tessera_protocol::RoleSelections>,
    /// Optional permission mode override.
    pub permission_mode: Option<PermissionMode>,
    /// Agent ID to resume from, if any.
    pub resume_from: Option<String>,
}

/// Result of spawning a subagent.
#[derive(Debug, Clone)]
pub struct SpawnAgentResult {
    /// Identifier of the spawned agent.
    pub agent_id: String,
    /// Immediate output, present for foreground spawns that completed.
    pub output: Option<String>,
    /// Output file path, present for backgrounded spawns.
    pub output_file: Option<PathBuf>,
    /// Cancellation token for stopping the agent via `TaskStop`.
    pub cancel_token: Option<CancellationToken>,
}

/// Callback for spawning a subagent (wired to a `SubagentManager` externally).
pub type SpawnAgentFn = Arc<
    dyn Fn(SpawnAgentInput) -> BoxFuture<'static, Result<SpawnAgentResult, String>>
        + Send
        + Sync,
>;

/// Context for tool execution.
///
/// This provides everything a tool needs during execution:
/// - Call identification
/// - Working directory
/// - Permission mode and approvals
/// - Event channel for progress updates
/// - Cancellation support
/// - File tracking
/// - Plan mode, skill, subagent, and shell integration points
#[derive(Clone)]
pub struct ToolContext {
    /// Unique call ID for this execution.
    pub call_id: String,
    /// Session ID.
    pub session_id: String,
    /// Identifier of the agent this context belongs to, if it is a subagent.
    pub agent_id: Option<String>,
    /// Current working directory.
    pub cwd: PathBuf,
    /// Permission mode for this execution.
    pub permission_mode: PermissionMode,
    /// Channel for emitting loop events.
    pub event_tx: Option<mpsc::Sender<LoopEvent>>,
    /// Cancellation token for aborting execution.
    pub cancel_token: CancellationToken,
    /// Stored approvals.
    pub approval_store: Arc<Mutex<ApprovalStore>>,
    /// File tracker.
    pub file_tracker: Arc<Mutex<FileTracker>>,
    /// Per-path read state, used to detect concurrent modification before writes.
    pub file_read_states: Arc<Mutex<HashMap<PathBuf, FileReadState>>>,
    /// Whether plan mode is currently active.
    pub is_plan_mode: bool,
    /// Path to the current plan file, when in plan mode.
    pub plan_file_path: Option<PathBuf>,
    /// Feature flags gating optional tool behavior.
    pub features: tessera_protocol::Features,
    /// Web search configuration.
    pub web_search_config: tessera_protocol::WebSearchConfig,
    /// Web fetch configuration.
    pub web_fetch_config: tessera_protocol::WebFetchConfig,
    /// Shell executor for command execution and background tasks.
    pub shell_executor: tessera_shell::ShellExecutor,
    /// Skills invoked during this turn, shared across tool contexts.
    pub invoked_skills: Arc<Mutex<Vec<InvokedSkill>>>,
    /// Hook registry for skill-registered and subagent lifecycle hooks.
    pub hook_registry: Option<Arc<tessera_hooks::HookRegistry>>,
    /// Skill manager for the Skill tool.
    pub skill_manager: Option<Arc<tessera_skill::SkillManager>>,
    /// Parent's model role selections, for subagent isolation.
    pub parent_selections: Option<tessera_protocol::RoleSelections>,
    /// Shared registry of cancellation tokens for background agents.
    pub agent_cancel_tokens: AgentCancelTokens,
    /// Base directory for background agent output files.
    pub agent_output_dir: Option<PathBuf>,
    /// Session directory for persisted tool results.
    pub session_dir: Option<PathBuf>,
    /// Callback for spawning subagents via the Task tool.
    pub spawn_agent_fn: Option<SpawnAgentFn>,
    /// Callback for single-shot LLM calls (SmartEdit correction fallback).
    pub model_call_fn: Option<ModelCallFn>,
    /// Interactive approval flow for permission requests.
    pub permission_requester: Option<Arc<dyn PermissionRequester>>,
    /// Permission rule evaluator (allow/ask/deny rules from settings).
    pub permission_evaluator: Option<crate::permission_rules::PermissionRuleEvaluator>,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(call_id: impl Into<String>, session_id: impl Into<String>, cwd: PathBuf) -> Self {
        Self {
            call_id: call_id.into(),
            session_id: session_id.into(),
            agent_id: None,
            cwd: cwd.clone(),
            permission_mode: PermissionMode::Default,
            event_tx: None,
            cancel_token: CancellationToken::new(),
            approval_store: Arc::new(Mutex::new(ApprovalStore::new())),
            file_tracker: Arc::new(Mutex::new(FileTracker::new())),
            file_read_states: Arc::new(Mutex::new(HashMap::new())),
            is_plan_mode: false,
            plan_file_path: None,
            features: tessera_protocol::Features::with_defaults(),
            web_search_config: tessera_protocol::WebSearchConfig::default(),
            web_fetch_config: tessera_protocol::WebFetchConfig::default(),
            shell_executor: tessera_shell::ShellExecutor::new(cwd),
            invoked_skills: Arc::new(Mutex::new(Vec::new())),
            hook_registry: None,
            skill_manager: None,
            parent_selections: None,
            agent_cancel_tokens: Arc::new(Mutex::new(HashMap::new())),
            agent_output_dir: None,
            session_dir: None,
            spawn_agent_fn: None,
            model_call_fn: None,
            permission_requester: None,
            permission_evaluator: None,
        }
    }

    /// Set the permission mode.
    pub fn with_permission_mode(mut self, mode: PermissionMode) -> Self {
        self.permission_mode = mode;
        self
    }

    /// Set the event channel.
    pub fn with_event_tx(mut self, tx: mpsc::Sender<LoopEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    /// Set the cancellation token.
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel_token = token;
        self
    }

    /// Set the approval store.
    pub fn with_approval_store(mut self, store: Arc<Mutex<ApprovalStore>>) -> Self {
        self.approval_store = store;
        self
    }

    /// Set the file tracker.
    pub fn with_file_tracker(mut self, tracker: Arc<Mutex<FileTracker>>) -> Self {
        self.file_tracker = tracker;
        self
    }

    /// Set plan mode and the active plan file path.
    pub fn with_plan_mode(mut self, is_plan_mode: bool, plan_file_path: Option<PathBuf>) -> Self {
        self.is_plan_mode = is_plan_mode;
        self.plan_file_path = plan_file_path;
        self
    }

    /// Set the agent ID (for subagent-scoped tool contexts).
    pub fn with_agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Emit a loop event.
    pub async fn emit_event(&self, event: LoopEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event).await;
        }
    }

    /// Emit tool progress.
    pub async fn emit_progress(&self, message: impl Into<String>) {
        self.emit_event(LoopEvent::ToolProgress {
            call_id: self.call_id.clone(),
            progress: tessera_protocol::ToolProgressInfo {
                message: Some(message.into()),
                percentage: None,
                bytes_processed: None,
                total_bytes: None,
            },
        })
        .await;
    }

    /// Emit tool progress with percentage.
    pub async fn emit_progress_percent(&self, message: impl Into<String>, percentage: i32) {
        self.emit_event(LoopEvent::ToolProgress {
            call_id: self.call_id.clone(),
            progress: tessera_protocol::ToolProgressInfo {
                message: Some(message.into()),
                percentage: Some(percentage),
                bytes_processed: None,
                total_bytes: None,
            },
        })
        .await;
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Wait for cancellation or completion.
    pub async fn cancelled(&self) {
        self.cancel_token.cancelled().await
    }

    /// Record a file read.
    pub async fn record_file_read(&self, path: impl Into<PathBuf>) {
        self.file_tracker.lock().await.record_read(path);
    }

    /// Record a file read along with its content snapshot, for later
    /// staleness detection by `Edit`/`SmartEdit`.
    pub async fn record_file_read_with_state(
        &self,
        path: impl Into<PathBuf>,
        state: FileReadState,
    ) {
        let path = path.into();
        self.file_tracker.lock().await.record_read(&path);
        self.file_read_states.lock().await.insert(path, state);
    }

    /// Retrieve the recorded read state for `path`, if the file was read
    /// during this context's lifetime.
    pub async fn file_read_state(&self, path: &PathBuf) -> Option<FileReadState> {
        self.file_read_states.lock().await.get(path).cloned()
    }

    /// Record a file modification.
    pub async fn record_file_modified(&self, path: impl Into<PathBuf>) {
        self.file_tracker.lock().await.record_modified(path);
    }

    /// Check if a file was read.
    pub async fn was_file_read(&self, path: &PathBuf) -> bool {
        self.file_tracker.lock().await.was_read(path)
    }

    /// Check if a file was modified.
    pub async fn was_file_modified(&self, path: &PathBuf) -> bool {
        self.file_tracker.lock().await.was_modified(path)
    }

    /// Check if an action is approved.
    pub async fn is_approved(&self, tool_name: &str, pattern: &str) -> bool {
        self.approval_store
            .lock()
            .await
            .is_approved(tool_name, pattern)
    }

    /// Approve a specific pattern.
    pub async fn approve_pattern(&self, tool_name: &str, pattern: &str) {
        self.approval_store
            .lock()
            .await
            .approve_pattern(tool_name, pattern);
    }

    /// Approve a tool for the session.
    pub async fn approve_session(&self, tool_name: &str) {
        self.approval_store.lock().await.approve_session(tool_name);
    }

    /// Persist an approved prefix pattern rule to disk (a no-op unless a
    /// persistence backend has been wired up by the caller).
    ///
    /// The default implementation only affects the in-memory approval
    /// store via [`approve_pattern`](Self::approve_pattern); callers that
    /// want durable rules should layer their own persistence on top by
    /// observing `PermissionResult::NeedsApproval` decisions.
    pub async fn persist_permission_rule(&self, tool_name: &str, pattern: &str) {
        self.approve_pattern(tool_name, pattern).await;
    }

    /// Whether this context has a subagent spawn callback configured.
    pub fn can_spawn_agent(&self) -> bool {
        self.spawn_agent_fn.is_some()
    }

    /// Spawn a subagent via the configured callback.
    pub async fn spawn_agent(&self, input: SpawnAgentInput) -> Result<SpawnAgentResult, String> {
        match &self.spawn_agent_fn {
            Some(f) => f(input).await,
            None => Err("no spawn_agent_fn configured".to_string()),
        }
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let path = PathBuf::from(path);
        if path.is_absolute() {
            path
        } else {
            self.cwd.join(path)
        }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext")
            .field("call_id", &self.call_id)
            .field("session_id", &self.session_id)
            .field("agent_id", &self.agent_id)
            .field("cwd", &self.cwd)
            .field("permission_mode", &self.permission_mode)
            .field("is_plan_mode", &self.is_plan_mode)
            .field("is_cancelled", &self.is_cancelled())
            .finish_non_exhaustive()
    }
}

/// Builder for creating tool contexts.
pub struct ToolContextBuilder {
    ctx: ToolContext,
}

impl ToolContextBuilder {
    /// Create a new builder.
    pub fn new(call_id: impl Into<String>, session_id: impl Into<String>) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        Self {
            ctx: ToolContext::new(call_id, session_id, cwd),
        }
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        self.ctx.shell_executor.set_cwd(cwd.clone());
        self.ctx.cwd = cwd;
        self
    }

    /// Set the agent ID (for subagent contexts).
    pub fn agent_id(mut self, agent_id: impl Into<String>) -> Self {
        self.ctx.agent_id = Some(agent_id.into());
        self
    }

    /// Set the permission mode.
    pub fn permission_mode(mut self, mode: PermissionMode) -> Self {
        self.ctx.permission_mode = mode;
        self
    }

    /// Set the event channel.
    pub fn event_tx(mut self, tx: mpsc::Sender<LoopEvent>) -> Self {
        self.ctx.event_tx = Some(tx);
        self
    }

    /// Set the cancellation token.
    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.ctx.cancel_token = token;
        self
    }

    /// Set the approval store.
    pub fn approval_store(mut self, store: Arc<Mutex<ApprovalStore>>) -> Self {
        self.ctx.approval_store = store;
        self
    }

    /// Set the file tracker.
    pub fn file_tracker(mut self, tracker: Arc<Mutex<FileTracker>>) -> Self {
        self.ctx.file_tracker = tracker;
        self
    }

    /// Set plan mode state.
    pub fn plan_mode(mut self, is_plan_mode: bool, plan_file_path: Option<PathBuf>) -> Self {
        self.ctx.is_plan_mode = is_plan_mode;
        self.ctx.plan_file_path = plan_file_path;
        self
    }

    /// Set feature flags.
    pub fn features(mut self, features: tessera_protocol::Features) -> Self {
        self.ctx.features = features;
        self
    }

    /// Set the web search configuration.
    pub fn web_search_config(mut self, config: tessera_protocol::WebSearchConfig) -> Self {
        self.ctx.web_search_config = config;
        self
    }

    /// Set the web fetch configuration.
    pub fn web_fetch_config(mut self, config: tessera_protocol::WebFetchConfig) -> Self {
        self.ctx.web_fetch_config = config;
        self
    }

    /// Set the shell executor.
    pub fn shell_executor(mut self, executor: tessera_shell::ShellExecutor) -> Self {
        self.ctx.shell_executor = executor;
        self
    }

    /// Set the shared invoked skills tracker.
    pub fn invoked_skills(mut self, skills: Arc<Mutex<Vec<InvokedSkill>>>) -> Self {
        self.ctx.invoked_skills = skills;
        self
    }

    /// Set the hook registry.
    pub fn hook_registry(mut self, registry: Arc<tessera_hooks::HookRegistry>) -> Self {
        self.ctx.hook_registry = Some(registry);
        self
    }

    /// Set the skill manager.
    pub fn skill_manager(mut self, manager: Arc<tessera_skill::SkillManager>) -> Self {
        self.ctx.skill_manager = Some(manager);
        self
    }

    /// Set the parent's model role selections.
    pub fn parent_selections(mut self, selections: tessera_protocol::RoleSelections) -> Self {
        self.ctx.parent_selections = Some(selections);
        self
    }

    /// Set the shared agent cancel token registry.
    pub fn agent_cancel_tokens(mut self, tokens: AgentCancelTokens) -> Self {
        self.ctx.agent_cancel_tokens = tokens;
        self
    }

    /// Set the background agent output directory.
    pub fn agent_output_dir(mut self, dir: PathBuf) -> Self {
        self.ctx.agent_output_dir = Some(dir);
        self
    }

    /// Set the session directory for persisted tool results.
    pub fn session_dir(mut self, dir: PathBuf) -> Self {
        self.ctx.session_dir = Some(dir);
        self
    }

    /// Set the subagent spawn callback.
    pub fn spawn_agent_fn(mut self, f: SpawnAgentFn) -> Self {
        self.ctx.spawn_agent_fn = Some(f);
        self
    }

    /// Set the single-shot model call callback.
    pub fn model_call_fn(mut self, f: ModelCallFn) -> Self {
        self.ctx.model_call_fn = Some(f);
        self
    }

    /// Set the interactive permission requester.
    pub fn permission_requester(mut self, requester: Arc<dyn PermissionRequester>) -> Self {
        self.ctx.permission_requester = Some(requester);
        self
    }

    /// Set the permission rule evaluator.
    pub fn permission_evaluator(
        mut self,
        evaluator: crate::permission_rules::PermissionRuleEvaluator,
    ) -> Self {
        self.ctx.permission_evaluator = Some(evaluator);
        self
    }

    /// Build the context.
    pub fn build(self) -> ToolContext {
        self.ctx
    }
}

#[cfg(test)]
#[path = "context.test.rs"]
mod tests;
