//! Read tool for viewing file contents with optional line windowing.

use super::prompts;
use crate::context::FileReadState;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_file_encoding::detect_encoding;
use tessera_protocol::ApprovalRequest;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::ContextModifier;
use tessera_protocol::PermissionResult;
use tessera_protocol::RiskSeverity;
use tessera_protocol::RiskType;
use tessera_protocol::SecurityRisk;
use tessera_protocol::ToolOutput;
use serde_json::Value;
use tokio::fs;

/// Maximum characters per line before truncation.
const MAX_LINE_CHARS: usize = 2000;

/// Tool for reading a single file's contents.
///
/// Supports an optional `offset`/`limit` window over the file's lines.
/// Records a [`FileReadState`] snapshot so later `Edit`/`SmartEdit` calls can
/// detect concurrent modification.
pub struct ReadTool;

impl ReadTool {
    /// Create a new Read tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReadTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ReadTool {
    fn name(&self) -> &str {
        "Read"
    }

    fn description(&self) -> &str {
        prompts::READ_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to read"
                },
                "offset": {
                    "type": "integer",
                    "description": "0-based line number to start reading from"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of lines to read"
                }
            },
            "required": ["file_path"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Safe
    }

    async fn check_permission(&self, input: &Value, ctx: &ToolContext) -> PermissionResult {
        let Some(path_str) = input.get("file_path").and_then(|v| v.as_str()) else {
            return PermissionResult::Passthrough;
        };
        let path = ctx.resolve_path(path_str);

        if crate::sensitive_files::is_locked_directory(&path) {
            return PermissionResult::Denied {
                reason: format!(
                    "Reading files in locked directory is not allowed: {}",
                    path.display()
                ),
            };
        }

        if crate::sensitive_files::is_sensitive_file(&path) {
            return PermissionResult::NeedsApproval {
                request: ApprovalRequest {
                    request_id: format!("sensitive-read-{}", path.display()),
                    tool_name: self.name().to_string(),
                    description: format!("Reading sensitive file: {}", path.display()),
                    risks: vec![SecurityRisk {
                        risk_type: RiskType::SensitiveFile,
                        severity: RiskSeverity::Medium,
                        message: format!(
                            "File '{}' may contain credentials or sensitive configuration",
                            path.display()
                        ),
                    }],
                    allow_remember: true,
                    proposed_prefix_pattern: None,
                },
            };
        }

        if crate::sensitive_files::is_outside_cwd(&path, &ctx.cwd) {
            return PermissionResult::NeedsApproval {
                request: ApprovalRequest {
                    request_id: format!("outside-cwd-read-{}", path.display()),
                    tool_name: self.name().to_string(),
                    description: format!(
                        "Reading file outside working directory: {}",
                        path.display()
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
        let file_path = input["file_path"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "file_path must be a string",
            }
            .build()
        })?;
        let offset = input.get("offset").and_then(|v| v.as_i64()).unwrap_or(0).max(0) as usize;
        let limit = input.get("limit").and_then(|v| v.as_i64()).map(|n| n.max(0) as usize);

        let path = ctx.resolve_path(file_path);

        if !path.exists() {
            return Err(crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("File not found: {}", path.display()),
            }
            .build());
        }
        if path.is_dir() {
            return Err(crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Path is a directory, not a file: {}", path.display()),
            }
            .build());
        }

        let bytes = fs::read(&path).await.map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to read file: {e}"),
            }
            .build()
        })?;
        let encoding = detect_encoding(&bytes);
        let content = encoding.decode(&bytes).map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to decode file: {e}"),
            }
            .build()
        })?;

        let lines: Vec<&str> = content.lines().collect();
        let start = offset.min(lines.len());
        let end = match limit {
            Some(limit) => (start + limit).min(lines.len()),
            None => lines.len(),
        };
        let windowed = start > 0 || end < lines.len();

        let mut output = String::new();
        for (i, line) in lines[start..end].iter().enumerate() {
            if line.chars().count() > MAX_LINE_CHARS {
                let truncated: String = line.chars().take(MAX_LINE_CHARS).collect();
                output.push_str(&format!("{:>6}\t{truncated}\n", start + i + 1));
            } else {
                output.push_str(&format!("{:>6}\t{line}\n", start + i + 1));
            }
        }

        ctx.record_file_read(&path).await;
        let file_mtime = fs::metadata(&path).await.ok().and_then(|m| m.modified().ok());
        let read_state = if windowed {
            FileReadState::partial(start as i32, (end - start) as i32, file_mtime)
        } else {
            FileReadState::complete(content.clone(), file_mtime)
        };
        ctx.record_file_read_with_state(&path, read_state).await;

        let mut result = ToolOutput::text(output);
        result.modifiers.push(ContextModifier::FileRead {
            path: path.clone(),
            content,
        });
        Ok(result)
    }
}

#[cfg(test)]
#[path = "read.test.rs"]
mod tests;
