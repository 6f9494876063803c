//! MCP (Model Context Protocol) server configuration types.
//!
//! These types define how plugins can contribute MCP servers. The actual
//! MCP client integration is deferred to the MCP client implementation.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Default function for auto_start field.
fn default_true() -> bool {
    true
}

/// Configuration for an MCP server contributed by a plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Unique name for this MCP server.
    pub name: String,

    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Transport configuration.
    pub transport: McpTransport,

    /// Environment variables to set when starting the server.
    #[serde(default)]
    pub env: HashMap<String, String>,

    /// Whether to automatically start this server.
    #[serde(default = "default_true")]
    pub auto_start: bool,
}

impl McpServerConfig {
    /// Resolves `${...}` variable patterns in the transport command/args/url
    /// and environment values.
    ///
    /// Supports:
    /// - `${TESSERA_PLUGIN_ROOT}` — replaced with `plugin_root`.
    /// - `${env.VAR}` — replaced with the process environment variable
    ///   `VAR`, or an empty string if unset.
    /// - `${user_config.KEY}` — replaced with the plugin's user-configured
    ///   value for `KEY`, or an empty string if absent or `user_config` is
    ///   `None`.
    pub fn resolve_variables(
        &mut self,
        plugin_root: &std::path::Path,
        user_config: Option<&HashMap<String, serde_json::Value>>,
    ) {
        let root = plugin_root.display().to_string();

        match &mut self.transport {
            McpTransport::Stdio { command, args } => {
                *command = resolve_string(command, &root, user_config);
                for arg in args.iter_mut() {
                    *arg = resolve_string(arg, &root, user_config);
                }
            }
            McpTransport::Http { url } => {
                *url = resolve_string(url, &root, user_config);
            }
        }

        for value in self.env.values_mut() {
            *value = resolve_string(value, &root, user_config);
        }
    }
}

fn resolve_string(
    input: &str,
    plugin_root: &str,
    user_config: Option<&HashMap<String, serde_json::Value>>,
) -> String {
    let resolved = input.replace("${TESSERA_PLUGIN_ROOT}", plugin_root);
    let resolved = replace_variables(&resolved, "env.", |key| {
        std::env::var(key).unwrap_or_default()
    });
    replace_variables(&resolved, "user_config.", |key| {
        user_config
            .and_then(|cfg| cfg.get(key))
            .map(json_value_to_string)
            .unwrap_or_default()
    })
}

/// Replaces every `${<prefix><key>}` occurrence in `input` with
/// `resolve(key)`.
fn replace_variables(input: &str, prefix: &str, resolve: impl Fn(&str) -> String) -> String {
    let pattern = format!("${{{prefix}");
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(&pattern) {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let key = &rest[start + pattern.len()..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&resolve(key));
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn json_value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Transport configuration for MCP servers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum McpTransport {
    /// Standard input/output transport (subprocess).
    Stdio {
        /// Command to execute.
        command: String,
        /// Command arguments.
        #[serde(default)]
        args: Vec<String>,
    },

    /// HTTP transport.
    Http {
        /// Server URL.
        url: String,
    },
}

#[cfg(test)]
#[path = "mcp.test.rs"]
mod tests;
