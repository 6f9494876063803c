//! Tool trait definition with 5-stage pipeline.
//!
//! This module defines the [`Tool`] trait that all tools must implement,
//! providing a standardized execution pipeline.

use crate::context::ToolContext;
use crate::error::ToolError;
use async_trait::async_trait;
use tessera_protocol::{
    ConcurrencySafety, PermissionResult, ToolOutput, ToolResultContent, ValidationError,
    ValidationResult,
};
use hyper_sdk::ToolDefinition;
use serde_json::Value;

/// A tool that can be executed by the agent.
///
/// Tools implement a 5-stage pipeline:
/// 1. **Validate** - Check input validity
/// 2. **Check Permission** - Verify user has granted permission
/// 3. **Execute** - Perform the actual work
/// 4. **Post Process** - Transform output (optional)
/// 5. **Cleanup** - Release resources (optional)
///
/// # Concurrency Safety
///
/// Tools declare their concurrency safety via [`concurrency_safety`](Tool::concurrency_safety):
/// - `Safe` - Can run in parallel with other tools
/// - `Unsafe` - Must run sequentially (e.g., file writes, shell commands)
///
/// # Example
///
/// ```ignore
/// use tessera_tools::{Tool, ToolContext, ToolOutput, ToolError};
/// use async_trait::async_trait;
///
/// struct ReadTool;
///
/// #[async_trait]
/// impl Tool for ReadTool {
///     fn name(&self) -> &str { "Read" }
///     fn description(&self) -> &str { "Read file contents" }
///     fn input_schema(&self) -> serde_json::Value {
///         serde_json::json!({
///             "type": "object",
///             "properties": {
///                 "file_path": {"type": "string"}
///             },
///             "required": ["file_path"]
///         })
///     }
///
///     async fn execute(
///         &self,
///         input: serde_json::Value,
///         ctx: &mut ToolContext,
///     ) -> Result<ToolOutput, ToolError> {
///         let path = input["file_path"].as_str().unwrap();
///         let content = tokio::fs::read_to_string(path).await?;
///         Ok(ToolOutput::text(content))
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool name.
    fn name(&self) -> &str;

    /// Get the tool description.
    fn description(&self) -> &str;

    /// Get the JSON schema for tool input.
    fn input_schema(&self) -> Value;

    /// Get the concurrency safety of this tool.
    ///
    /// Default is `Safe` - tools can run in parallel.
    /// Override to return `Unsafe` for tools that modify state.
    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    /// Validate the input before execution.
    ///
    /// Default implementation checks against JSON schema.
    async fn validate(&self, input: &Value) -> ValidationResult {
        // Basic validation - check required fields exist
        let schema = self.input_schema();

        if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
            for field in required {
                if let Some(field_name) = field.as_str() {
                    if input.get(field_name).is_none() {
                        return ValidationResult::Invalid {
                            errors: vec![ValidationError::with_path(
                                format!("Missing required field: {field_name}"),
                                field_name,
                            )],
                        };
                    }
                }
            }
        }

        ValidationResult::Valid
    }

    /// The feature flag gating this tool, if any.
    ///
    /// Default is `None` - the tool is always available. Override for tools
    /// that should be excluded when their feature is disabled.
    fn feature_gate(&self) -> Option<tessera_protocol::Feature> {
        None
    }

    /// Check if the tool has permission to execute.
    ///
    /// Default implementation always allows. Override for tools that
    /// need user permission (e.g., file writes, shell commands).
    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    /// Execute the tool with the given input.
    ///
    /// This is the main execution method that performs the tool's work.
    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput, ToolError>;

    /// Post-process the output after execution.
    ///
    /// Default implementation returns output unchanged.
    async fn post_process(&self, output: ToolOutput, _ctx: &ToolContext) -> ToolOutput {
        output
    }

    /// Cleanup after execution (success or failure).
    ///
    /// Default implementation does nothing.
    async fn cleanup(&self, _ctx: &ToolContext) {}

    /// Convert to a tool definition for the API.
    fn to_definition(&self) -> ToolDefinition {
        ToolDefinition::full(self.name(), self.description(), self.input_schema())
    }

    /// Check if this tool is safe to run concurrently.
    fn is_concurrent_safe(&self) -> bool {
        matches!(self.concurrency_safety(), ConcurrencySafety::Safe)
    }

    /// Whether this specific invocation is safe to run concurrently with
    /// others.
    ///
    /// Default defers to [`concurrency_safety`](Tool::concurrency_safety).
    /// Override for tools whose safety depends on the input (e.g. a shell
    /// tool that is safe for read-only commands but not others).
    fn is_concurrency_safe_for(&self, _input: &Value) -> bool {
        self.is_concurrent_safe()
    }

    /// Whether this tool only reads state and never mutates it.
    ///
    /// Default is `true`. Override for tools that write files, run shell
    /// commands, or otherwise have side effects. Read-only tools are exempt
    /// from write-approval prompts in Plan mode.
    fn is_read_only(&self) -> bool {
        true
    }

    /// Maximum size, in characters, of this tool's result before it is
    /// truncated.
    ///
    /// Default is 30,000 characters.
    fn max_result_size_chars(&self) -> i32 {
        30_000
    }
}

/// Extension methods for ToolOutput.
pub trait ToolOutputExt {
    /// Create a text output.
    fn text(content: impl Into<String>) -> Self;

    /// Create a structured output.
    fn structured(value: Value) -> Self;

    /// Create an error output.
    fn error(message: impl Into<String>) -> Self;

    /// Create an empty output.
    fn empty() -> Self;
}

impl ToolOutputExt for ToolOutput {
    fn text(content: impl Into<String>) -> Self {
        Self {
            content: ToolResultContent::Text(content.into()),
            is_error: false,
            modifiers: Vec::new(),
        }
    }

    fn structured(value: Value) -> Self {
        Self {
            content: ToolResultContent::Structured(value),
            is_error: false,
            modifiers: Vec::new(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            content: ToolResultContent::Text(message.into()),
            is_error: true,
            modifiers: Vec::new(),
        }
    }

    fn empty() -> Self {
        Self {
            content: ToolResultContent::Text(String::new()),
            is_error: false,
            modifiers: Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "tool.test.rs"]
mod tests;
