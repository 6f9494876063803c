//! Glob tool for fast file-path pattern matching.

use super::prompts;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use globset::GlobBuilder;
use tessera_file_ignore::IgnoreConfig;
use tessera_file_ignore::IgnoreService;
use tessera_protocol::ApprovalRequest;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::PermissionResult;
use tessera_protocol::ToolOutput;
use serde_json::Value;
use std::path::PathBuf;
use std::time::SystemTime;

/// Maximum directory depth walked when resolving a glob pattern.
const MAX_DEPTH: usize = 20;

/// Tool for matching file paths against a glob pattern.
///
/// Results are sorted by modification time, most recently modified first.
pub struct GlobTool;

impl GlobTool {
    /// Create a new Glob tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GlobTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GlobTool {
    fn name(&self) -> &str {
        "Glob"
    }

    fn description(&self) -> &str {
        prompts::GLOB_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "pattern": {
                    "type": "string",
                    "description": "Glob pattern to match files against (e.g. \"**/*.rs\")"
                },
                "path": {
                    "type": "string",
                    "description": "Directory to search in (defaults to current working directory)"
                },
                "case_sensitive": {
                    "type": "boolean",
                    "description": "Whether matching is case sensitive (default true)"
                }
            },
            "required": ["pattern"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    async fn check_permission(&self, input: &Value, ctx: &ToolContext) -> PermissionResult {
        let search_path = input
            .get("path")
            .and_then(|v| v.as_str())
            .map(|p| ctx.resolve_path(p))
            .unwrap_or_else(|| ctx.cwd.clone());

        if crate::sensitive_files::is_sensitive_directory(&search_path) {
            return PermissionResult::NeedsApproval {
                request: ApprovalRequest {
                    request_id: format!("glob-sensitive-{}", search_path.display()),
                    tool_name: self.name().to_string(),
                    description: format!("Globbing sensitive directory: {}", search_path.display()),
                    risks: vec![],
                    allow_remember: true,
                    proposed_prefix_pattern: None,
                },
            };
        }

        if crate::sensitive_files::is_outside_cwd(&search_path, &ctx.cwd) {
            return PermissionResult::NeedsApproval {
                request: ApprovalRequest {
                    request_id: format!("glob-outside-cwd-{}", search_path.display()),
                    tool_name: self.name().to_string(),
                    description: format!(
                        "Globbing outside working directory: {}",
                        search_path.display()
                    ),
                    risks: vec![],
                    allow_remember: true,
                    proposed_prefix_pattern: None,
                },
            };
        }

        PermissionResult::Allowed
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let pattern = input["pattern"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "pattern must be a string",
            }
            .build()
        })?;
        let case_sensitive = input["case_sensitive"].as_bool().unwrap_or(true);
        let search_path = input["path"]
            .as_str()
            .map(|p| ctx.resolve_path(p))
            .unwrap_or_else(|| ctx.cwd.clone());

        let glob = GlobBuilder::new(pattern)
            .case_insensitive(!case_sensitive)
            .literal_separator(false)
            .build()
            .map_err(|e| {
                crate::error::tool_error::InvalidInputSnafu {
                    message: format!("Invalid glob pattern: {e}"),
                }
                .build()
            })?
            .compile_matcher();

        let ignore_config = IgnoreConfig::default().with_hidden(true);
        let ignore_service = IgnoreService::new(ignore_config);
        let mut walker_builder = ignore_service.create_walk_builder(&search_path);
        walker_builder.max_depth(Some(MAX_DEPTH));

        let mut matches: Vec<(PathBuf, Option<SystemTime>)> = Vec::new();
        for entry in walker_builder.build().flatten() {
            if entry.file_type().map(|t| !t.is_file()).unwrap_or(true) {
                continue;
            }
            let path = entry.path();
            let relative = path.strip_prefix(&search_path).unwrap_or(path);
            if glob.is_match(relative) || glob.is_match(path) {
                let mtime = entry.metadata().ok().and_then(|m| m.modified().ok());
                matches.push((path.to_path_buf(), mtime));
            }
        }

        matches.sort_by(|a, b| b.1.cmp(&a.1));

        if matches.is_empty() {
            return Ok(ToolOutput::text(format!(
                "No files found matching pattern '{pattern}' in {}",
                search_path.display()
            )));
        }

        let output = matches
            .into_iter()
            .map(|(path, _)| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        Ok(ToolOutput::text(output))
    }
}

#[cfg(test)]
#[path = "glob.test.rs"]
mod tests;
