//! Shell tool for executing a single command directly by argv, bypassing
//! shell parsing entirely.

use super::prompts;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_protocol::ApprovalRequest;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::PermissionResult;
use tessera_protocol::ToolOutput;
use serde_json::Value;
use tokio::process::Command;

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Tool for executing a command directly by argv (no shell interpretation).
pub struct ShellTool;

impl ShellTool {
    /// Create a new Shell tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for ShellTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for ShellTool {
    fn name(&self) -> &str {
        "shell"
    }

    fn description(&self) -> &str {
        prompts::SHELL_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "command": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Argv to execute directly, with no shell interpretation"
                },
                "timeout": {
                    "type": "integer",
                    "description": "Optional timeout in seconds"
                }
            },
            "required": ["command"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_read_only(&self) -> bool {
        false
    }

    fn max_result_size_chars(&self) -> i32 {
        30_000
    }

    async fn check_permission(&self, input: &Value, _ctx: &ToolContext) -> PermissionResult {
        let argv: Vec<String> = input["command"]
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        PermissionResult::NeedsApproval {
            request: ApprovalRequest {
                request_id: format!("shell-{}", argv.join(" ")),
                tool_name: self.name().to_string(),
                description: argv.join(" "),
                risks: vec![],
                allow_remember: true,
                proposed_prefix_pattern: None,
            },
        }
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let argv: Vec<String> = input["command"]
            .as_array()
            .ok_or_else(|| {
                crate::error::tool_error::InvalidInputSnafu {
                    message: "command must be an array of strings",
                }
                .build()
            })?
            .iter()
            .map(|v| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        crate::error::tool_error::InvalidInputSnafu {
                            message: "command entries must be strings",
                        }
                        .build()
                    })
            })
            .collect::<Result<Vec<String>>>()?;

        let (program, args) = argv.split_first().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "command must not be empty",
            }
            .build()
        })?;

        let timeout_secs = input["timeout"].as_u64().unwrap_or(DEFAULT_TIMEOUT_SECS);

        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.current_dir(&ctx.cwd);
        cmd.kill_on_drop(true);

        let output = tokio::time::timeout(
            std::time::Duration::from_secs(timeout_secs),
            cmd.output(),
        )
        .await
        .map_err(|_| {
            crate::error::tool_error::TimeoutSnafu {
                timeout_secs: timeout_secs as i64,
            }
            .build()
        })?
        .map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to spawn '{program}': {e}"),
            }
            .build()
        })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        let mut text = String::new();
        if !stdout.is_empty() {
            text.push_str(&stdout);
        }
        if !stderr.is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str("STDERR:\n");
            text.push_str(&stderr);
        }

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            if text.is_empty() {
                text = format!("Command failed with exit code {code}");
            } else {
                text.push_str(&format!("\n\nExit code: {code}"));
            }
            return Ok(ToolOutput::error(text));
        }

        if text.is_empty() {
            text = "(no output)".to_string();
        }
        Ok(ToolOutput::text(text))
    }
}

#[cfg(test)]
#[path = "shell.test.rs"]
mod tests;
