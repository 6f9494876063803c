//! LSP tool for code intelligence (go-to-definition, find-references, symbols).
//!
//! No language server manager is wired into the runtime yet, so every
//! operation currently fails with a clear "feature not enabled" error; the
//! formatting helpers and schema are kept ready for when one is attached.

use super::prompts;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::Feature;
use tessera_protocol::PermissionResult;
use tessera_protocol::ToolOutput;
use serde_json::Value;

/// A location in a source file, as returned by an LSP operation.
#[derive(Debug, Clone)]
pub struct Location {
    pub file_path: String,
    pub line: u32,
    pub column: u32,
}

/// A symbol found within a document.
#[derive(Debug, Clone)]
pub struct DocumentSymbol {
    pub name: String,
    pub kind: String,
    pub line: u32,
}

/// Tool for code-intelligence operations backed by a language server.
pub struct LspTool;

impl LspTool {
    /// Create a new Lsp tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LspTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for LspTool {
    fn name(&self) -> &str {
        "Lsp"
    }

    fn description(&self) -> &str {
        prompts::LSP_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "operation": {
                    "type": "string",
                    "enum": ["goToDefinition", "findReferences", "documentSymbols", "hover"]
                },
                "filePath": { "type": "string" },
                "symbolName": { "type": "string" },
                "line": { "type": "integer" },
                "column": { "type": "integer" }
            },
            "required": ["operation", "filePath"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    fn feature_gate(&self) -> Option<Feature> {
        Some(Feature::Lsp)
    }

    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    async fn execute(&self, _input: Value, _ctx: &mut ToolContext) -> Result<ToolOutput> {
        Err(crate::error::tool_error::ExecutionFailedSnafu {
            message: "LSP feature not enabled: no language server manager is configured",
        }
        .build())
    }
}

/// Render a list of locations for display, or a placeholder if empty.
pub fn format_locations(locations: &[Location]) -> String {
    if locations.is_empty() {
        return "No results found".to_string();
    }
    locations
        .iter()
        .map(|loc| format!("{}:{}:{}", loc.file_path, loc.line, loc.column))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a list of document symbols for display, or a placeholder if empty.
pub fn format_document_symbols(symbols: &[DocumentSymbol]) -> String {
    if symbols.is_empty() {
        return "No symbols found in this file".to_string();
    }
    symbols
        .iter()
        .map(|s| format!("{} ({}) — line {}", s.name, s.kind, s.line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "lsp.test.rs"]
mod tests;
