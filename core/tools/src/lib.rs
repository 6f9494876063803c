//! Tool execution for the tessera agent: the built-in tool catalog, the
//! permission-checked execution pipeline, and the per-turn [`ToolContext`]
//! tools run against.

pub mod builtin;
pub mod context;
pub mod error;
pub mod executor;
pub mod mcp_tool;
pub mod permission_rules;
pub mod registry;
pub mod result_persistence;
pub mod sensitive_files;
pub mod tool;

pub use context::ApprovalStore;
pub use context::FileReadState;
pub use context::FileTracker;
pub use context::ToolContext;
pub use context::ToolContextBuilder;
pub use error::Result;
pub use error::ToolError;
pub use executor::ExecutorConfig;
pub use executor::StreamingToolExecutor;
pub use executor::ToolExecutionResult;
pub use mcp_tool::McpTool;
pub use mcp_tool::McpToolAdapter;
pub use mcp_tool::McpToolCaller;
pub use permission_rules::PermissionRule;
pub use permission_rules::PermissionRuleEvaluator;
pub use permission_rules::RuleAction;
pub use registry::McpToolInfo;
pub use registry::ToolRegistry;
pub use result_persistence::persist_if_needed;
pub use tool::Tool;
pub use tool::ToolOutputExt;

/// Tool definition type used to describe a tool to a model, re-exported so
/// dependents don't need a direct dependency on the provider SDK crate.
pub use hyper_sdk::ToolDefinition;
