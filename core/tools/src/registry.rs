//! Tool registry: name resolution, aliasing, and MCP tool bookkeeping.

use crate::tool::Tool;
use hyper_sdk::ToolDefinition;
use std::collections::HashMap;
use std::sync::Arc;
use tessera_protocol::Features;
use tessera_protocol::McpAutoSearchConfig;

/// Metadata for a tool discovered from an MCP server.
///
/// Unlike built-in tools, MCP tool definitions may be deferred out of the
/// system prompt (see [`ToolRegistry::defer_mcp_tool_definitions`]) once
/// their combined size grows past the auto-search threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct McpToolInfo {
    /// Name of the MCP server that exposes this tool.
    pub server: String,
    /// Tool name as reported by the server.
    pub name: String,
    /// Tool description, if the server provided one.
    pub description: Option<String>,
    /// JSON schema for the tool's input.
    pub input_schema: serde_json::Value,
}

impl McpToolInfo {
    /// Qualified name used to key this tool in the registry and in tool
    /// calls: `mcp__<server>_<name>`.
    pub fn qualified_name(&self) -> String {
        format!("mcp__{}_{}", self.server, self.name)
    }
}

/// Registry of executable tools and known MCP tool metadata.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    mcp_tools: HashMap<String, McpToolInfo>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under its own name.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let tool: Arc<dyn Tool> = Arc::new(tool);
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Register a tool under its own name and an additional alias.
    pub fn register_with_alias<T: Tool + 'static>(&mut self, tool: T, alias: &str) {
        let tool: Arc<dyn Tool> = Arc::new(tool);
        self.tools.insert(tool.name().to_string(), tool.clone());
        self.tools.insert(alias.to_string(), tool);
    }

    /// Whether a tool is registered (executable) under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Look up an executable tool by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Remove an executable tool, returning it if present.
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.remove(name)
    }

    /// Record metadata for every tool exposed by an MCP server.
    ///
    /// This only tracks metadata; it does not make the tools executable.
    /// Callers that also want to dispatch calls to these tools must
    /// separately `register` an executor under the qualified name.
    pub fn register_mcp_server(&mut self, server: &str, tools: Vec<McpToolInfo>) {
        for mut info in tools {
            info.server = server.to_string();
            self.mcp_tools.insert(info.qualified_name(), info);
        }
    }

    /// Drop all MCP tool metadata (and any matching executable tools)
    /// belonging to `server`.
    pub fn unregister_mcp_server(&mut self, server: &str) {
        let qualified: Vec<String> = self
            .mcp_tools
            .iter()
            .filter(|(_, info)| info.server == server)
            .map(|(name, _)| name.clone())
            .collect();
        for name in qualified {
            self.mcp_tools.remove(&name);
            self.tools.remove(&name);
        }
    }

    /// Whether `name` is the qualified name of a known MCP tool.
    pub fn is_mcp_tool(&self, name: &str) -> bool {
        self.mcp_tools.contains_key(name)
    }

    /// Snapshot of all known MCP tool metadata.
    pub fn mcp_tool_snapshot(&self) -> Vec<McpToolInfo> {
        self.mcp_tools.values().cloned().collect()
    }

    /// Total characters across all known MCP tool names and descriptions,
    /// used to decide whether to switch to on-demand tool search.
    pub fn mcp_description_chars(&self) -> i32 {
        self.mcp_tools
            .values()
            .map(|info| {
                let desc_len = info.description.as_deref().map_or(0, |d| d.chars().count());
                (info.name.chars().count() + desc_len) as i32
            })
            .sum()
    }

    /// Whether on-demand MCP tool search should be used given the current
    /// amount of MCP tool metadata and context window.
    pub fn should_enable_auto_search(
        &self,
        context_window: i32,
        config: &McpAutoSearchConfig,
    ) -> bool {
        config.should_use_auto_search(context_window, self.mcp_description_chars(), true)
    }

    /// Remove executable registrations for every known MCP tool, keeping
    /// their metadata intact. Returns the qualified names that were removed.
    ///
    /// Used when switching to on-demand tool search: the tools stop being
    /// offered directly but can still be looked up by name once found.
    pub fn defer_mcp_tool_definitions(&mut self) -> Vec<String> {
        let names: Vec<String> = self.mcp_tools.keys().cloned().collect();
        names
            .into_iter()
            .filter(|name| self.tools.remove(name).is_some())
            .collect()
    }

    /// All registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Definitions for every executable tool, regardless of feature gating.
    pub fn all_definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.to_definition()).collect()
    }

    /// Definitions for every executable tool whose feature gate (if any) is
    /// enabled in `features`.
    pub fn definitions_filtered(&self, features: &Features) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .filter(|t| t.feature_gate().is_none_or(|f| features.enabled(f)))
            .map(|t| t.to_definition())
            .collect()
    }
}

#[cfg(test)]
#[path = "registry.test.rs"]
mod tests;
