//! Write tool for creating or fully overwriting files.
//!
//! Overwriting an existing file requires it to have been read first (tracked
//! via FileTracker) and checks SHA256-based concurrent modification, just
//! like Edit. New files are always allowed (subject to plan mode).

use super::prompts;
use crate::context::FileReadState;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_file_encoding::Encoding;
use tessera_file_encoding::LineEnding;
use tessera_file_encoding::detect_encoding;
use tessera_file_encoding::detect_line_ending;
use tessera_file_encoding::normalize_line_endings;
use tessera_file_encoding::write_with_format_async;
use tessera_plan_mode::is_safe_file;
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

use super::edit_strategies::diff_stats;

/// Tool for creating a new file or fully overwriting an existing one.
pub struct WriteTool;

impl WriteTool {
    /// Create a new Write tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for WriteTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for WriteTool {
    fn name(&self) -> &str {
        "Write"
    }

    fn description(&self) -> &str {
        prompts::WRITE_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "The absolute path to the file to write"
                },
                "content": {
                    "type": "string",
                    "description": "The content to write to the file"
                }
            },
            "required": ["file_path", "content"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_read_only(&self) -> bool {
        false
    }

    async fn check_permission(&self, input: &Value, ctx: &ToolContext) -> PermissionResult {
        if let Some(path_str) = input.get("file_path").and_then(|v| v.as_str()) {
            let path = ctx.resolve_path(path_str);

            if crate::sensitive_files::is_locked_directory(&path) {
                return PermissionResult::Denied {
                    reason: format!(
                        "Writing files in locked directory is not allowed: {}",
                        path.display()
                    ),
                };
            }

            if ctx.is_plan_mode && !is_safe_file(&path, ctx.plan_file_path.as_deref()) {
                return PermissionResult::Denied {
                    reason: format!(
                        "Plan mode: cannot write '{}'. Only the plan file can be modified.",
                        path.display()
                    ),
                };
            }

            if crate::sensitive_files::is_sensitive_file(&path) {
                return PermissionResult::NeedsApproval {
                    request: ApprovalRequest {
                        request_id: format!("sensitive-write-{}", path.display()),
                        tool_name: self.name().to_string(),
                        description: format!("Writing sensitive file: {}", path.display()),
                        risks: vec![SecurityRisk {
                            risk_type: RiskType::SensitiveFile,
                            severity: RiskSeverity::High,
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
        }

        PermissionResult::NeedsApproval {
            request: ApprovalRequest {
                request_id: format!(
                    "write-{}",
                    input
                        .get("file_path")
                        .and_then(|v| v.as_str())
                        .unwrap_or("unknown")
                ),
                tool_name: self.name().to_string(),
                description: format!(
                    "Write: {}",
                    input
                        .get("file_path")
                        .and_then(|v| v.as_str())
                        .unwrap_or("unknown")
                ),
                risks: vec![],
                allow_remember: true,
                proposed_prefix_pattern: None,
            },
        }
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let file_path = input["file_path"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "file_path must be a string",
            }
            .build()
        })?;
        let content = input["content"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "content must be a string",
            }
            .build()
        })?;

        let path = ctx.resolve_path(file_path);

        if ctx.is_plan_mode && !is_safe_file(&path, ctx.plan_file_path.as_deref()) {
            return Err(crate::error::tool_error::ExecutionFailedSnafu {
                message: format!(
                    "Plan mode: cannot write '{}'. Only the plan file can be modified during plan mode.",
                    path.display()
                ),
            }
            .build());
        }

        let exists = path.exists();

        if exists {
            if !ctx.was_file_read(&path).await {
                return Err(crate::error::tool_error::ExecutionFailedSnafu {
                    message: format!(
                        "File must be read before overwriting: {}. Use the Read tool first.",
                        path.display()
                    ),
                }
                .build());
            }

            let bytes = fs::read(&path).await.map_err(|e| {
                crate::error::tool_error::ExecutionFailedSnafu {
                    message: format!("Failed to read file: {e}"),
                }
                .build()
            })?;
            let old_encoding = detect_encoding(&bytes);
            let old_content = old_encoding.decode(&bytes).map_err(|e| {
                crate::error::tool_error::ExecutionFailedSnafu {
                    message: format!("Failed to decode file: {e}"),
                }
                .build()
            })?;
            let old_line_ending = detect_line_ending(&old_content);

            if let Some(read_state) = ctx.file_read_state(&path).await {
                if let Some(ref stored_hash) = read_state.content_hash {
                    let normalized = normalize_line_endings(&old_content, LineEnding::Lf);
                    let current_hash = FileReadState::compute_hash(&normalized);
                    if *stored_hash != current_hash {
                        return Err(crate::error::tool_error::ExecutionFailedSnafu {
                            message: format!(
                                "File has been modified externally since last read: {}. Read the file again before writing.",
                                path.display()
                            ),
                        }
                        .build());
                    }
                }
            }

            write_with_format_async(&path, content, old_encoding, old_line_ending)
                .await
                .map_err(|e| {
                    crate::error::tool_error::ExecutionFailedSnafu {
                        message: format!("Failed to write file: {e}"),
                    }
                    .build()
                })?;

            let normalized_content = normalize_line_endings(content, LineEnding::Lf);
            ctx.record_file_modified(&path).await;
            let new_mtime = fs::metadata(&path)
                .await
                .ok()
                .and_then(|m| m.modified().ok());
            ctx.record_file_read_with_state(
                &path,
                FileReadState::complete(normalized_content.clone(), new_mtime),
            )
            .await;

            let stats = diff_stats(&old_content, content);
            let mut result = ToolOutput::text(format!(
                "Successfully wrote to {}{stats}",
                path.display()
            ));
            result.modifiers.push(ContextModifier::FileRead {
                path: path.clone(),
                content: normalized_content,
            });
            Ok(result)
        } else {
            if let Some(parent) = path.parent() {
                if !parent.exists() {
                    fs::create_dir_all(parent).await.map_err(|e| {
                        crate::error::tool_error::ExecutionFailedSnafu {
                            message: format!("Failed to create directory: {e}"),
                        }
                        .build()
                    })?;
                }
            }

            write_with_format_async(&path, content, Encoding::Utf8, LineEnding::Lf)
                .await
                .map_err(|e| {
                    crate::error::tool_error::ExecutionFailedSnafu {
                        message: format!("Failed to write file: {e}"),
                    }
                    .build()
                })?;

            let normalized_content = normalize_line_endings(content, LineEnding::Lf);
            ctx.record_file_modified(&path).await;
            let new_mtime = fs::metadata(&path)
                .await
                .ok()
                .and_then(|m| m.modified().ok());
            ctx.record_file_read_with_state(
                &path,
                FileReadState::complete(normalized_content.clone(), new_mtime),
            )
            .await;

            let mut result =
                ToolOutput::text(format!("Successfully created {}", path.display()));
            result.modifiers.push(ContextModifier::FileRead {
                path: path.clone(),
                content: normalized_content,
            });
            Ok(result)
        }
    }
}

#[cfg(test)]
#[path = "write.test.rs"]
mod tests;
