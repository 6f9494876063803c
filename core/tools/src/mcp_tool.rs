//! Adapter exposing a tool discovered on an MCP server through the local
//! [`Tool`] trait.

use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_mcp_types::ToolAnnotations;
use tessera_mcp_types::ToolInputSchema;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::ToolOutput;
use serde_json::Value;
use std::sync::Arc;

/// A tool as reported by an MCP server's `tools/list` response.
#[derive(Debug, Clone)]
pub struct McpTool {
    pub name: String,
    pub description: Option<String>,
    pub input_schema: ToolInputSchema,
    pub annotations: Option<ToolAnnotations>,
    pub output_schema: Option<ToolInputSchema>,
    pub title: Option<String>,
}

impl McpTool {
    /// Convert the MCP wire schema into the plain JSON schema [`Tool::input_schema`] expects.
    fn input_schema_json(&self) -> Value {
        serde_json::json!({
            "type": self.input_schema.r#type,
            "properties": self
                .input_schema
                .properties
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
            "required": self.input_schema.required.clone().unwrap_or_default(),
        })
    }
}

/// Dispatches a tool call to a remote MCP server.
#[async_trait]
pub trait McpToolCaller: Send + Sync {
    /// Invoke `tool` on `server` with `arguments`, returning the server's result.
    async fn call_tool(
        &self,
        server: &str,
        tool: &str,
        arguments: Value,
    ) -> std::result::Result<Value, String>;
}

/// Adapts an [`McpTool`] discovered on `server` into the local [`Tool`] trait,
/// dispatching execution through a [`McpToolCaller`].
pub struct McpToolAdapter {
    server: String,
    definition: McpTool,
    caller: Arc<dyn McpToolCaller>,
}

impl McpToolAdapter {
    /// Wrap a discovered MCP tool definition for execution through `caller`.
    pub fn new(
        server: impl Into<String>,
        definition: McpTool,
        caller: Arc<dyn McpToolCaller>,
    ) -> Self {
        Self {
            server: server.into(),
            definition,
            caller,
        }
    }

    /// Qualified name used to key this tool in the registry and in tool
    /// calls: `mcp__<server>_<name>`.
    pub fn qualified_name(&self) -> String {
        format!("mcp__{}_{}", self.server, self.definition.name)
    }
}

#[async_trait]
impl Tool for McpToolAdapter {
    fn name(&self) -> &str {
        self.definition.name.as_str()
    }

    fn description(&self) -> &str {
        self.definition.description.as_deref().unwrap_or("")
    }

    fn input_schema(&self) -> Value {
        self.definition.input_schema_json()
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        if self.is_read_only() {
            ConcurrencySafety::Safe
        } else {
            ConcurrencySafety::Unsafe
        }
    }

    fn is_read_only(&self) -> bool {
        self.definition
            .annotations
            .as_ref()
            .and_then(|a| a.read_only_hint)
            .unwrap_or(false)
    }

    async fn execute(&self, input: Value, _ctx: &mut ToolContext) -> Result<ToolOutput> {
        match self
            .caller
            .call_tool(&self.server, &self.definition.name, input)
            .await
        {
            Ok(value) => Ok(ToolOutput::text(
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()),
            )),
            Err(message) => Err(crate::error::tool_error::ExecutionFailedSnafu { message }.build()),
        }
    }
}

#[cfg(test)]
#[path = "mcp_tool.test.rs"]
mod tests;
