//! NotebookEdit tool for editing Jupyter notebook (`.ipynb`) cells.

use super::prompts;
use crate::context::FileReadState;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::ContextModifier;
use tessera_protocol::PermissionResult;
use tessera_protocol::ToolOutput;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tokio::fs;

/// A Jupyter notebook document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default = "default_nbformat")]
    pub nbformat: i64,
    #[serde(default)]
    pub nbformat_minor: i64,
}

fn default_nbformat() -> i64 {
    4
}

/// A single notebook cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Value,
    pub source: NotebookSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_count: Option<Value>,
}

/// Cell source, stored either as a single string or a list of lines (the two
/// forms the `.ipynb` format allows).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NotebookSource {
    Lines(Vec<String>),
    Single(String),
}

impl std::fmt::Display for NotebookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotebookSource::Lines(lines) => write!(f, "{}", lines.join("")),
            NotebookSource::Single(s) => write!(f, "{s}"),
        }
    }
}

/// Split `source` into the line-list form `.ipynb` conventionally uses
/// (every line but the last retains its trailing `\n`).
fn source_to_lines(source: &str) -> NotebookSource {
    if source.is_empty() {
        return NotebookSource::Lines(Vec::new());
    }
    let lines: Vec<String> = source.split_inclusive('\n').map(str::to_string).collect();
    NotebookSource::Lines(lines)
}

/// Tool for editing Jupyter notebook cells (replace, insert, or delete).
pub struct NotebookEditTool;

impl NotebookEditTool {
    /// Create a new NotebookEdit tool.
    pub fn new() -> Self {
        Self
    }

    fn find_cell_index(
        notebook: &Notebook,
        cell_id: Option<&str>,
        cell_number: Option<i64>,
    ) -> Result<usize> {
        if let Some(id) = cell_id {
            return notebook
                .cells
                .iter()
                .position(|c| c.id.as_deref() == Some(id))
                .ok_or_else(|| {
                    crate::error::tool_error::ExecutionFailedSnafu {
                        message: format!("Cell with id '{id}' not found"),
                    }
                    .build()
                });
        }
        if let Some(number) = cell_number {
            let number = number as usize;
            if number >= notebook.cells.len() {
                return Err(crate::error::tool_error::ExecutionFailedSnafu {
                    message: format!(
                        "cell_number {number} is out of bounds (notebook has {} cells)",
                        notebook.cells.len()
                    ),
                }
                .build());
            }
            return Ok(number);
        }
        Err(crate::error::tool_error::InvalidInputSnafu {
            message: "either cell_id or cell_number must be provided",
        }
        .build())
    }
}

impl Default for NotebookEditTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for NotebookEditTool {
    fn name(&self) -> &str {
        "NotebookEdit"
    }

    fn description(&self) -> &str {
        prompts::NOTEBOOK_EDIT_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "notebook_path": {
                    "type": "string",
                    "description": "The absolute path to the Jupyter notebook file"
                },
                "cell_id": {
                    "type": "string",
                    "description": "ID of the cell to edit"
                },
                "cell_number": {
                    "type": "integer",
                    "description": "0-based index of the cell to edit"
                },
                "new_source": {
                    "type": "string",
                    "description": "New source content for the cell"
                },
                "cell_type": {
                    "type": "string",
                    "enum": ["code", "markdown"],
                    "description": "Cell type, used when inserting a new cell"
                },
                "edit_mode": {
                    "type": "string",
                    "enum": ["replace", "insert", "delete"],
                    "default": "replace"
                }
            },
            "required": ["notebook_path", "new_source"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_read_only(&self) -> bool {
        false
    }

    async fn check_permission(&self, input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::NeedsApproval {
            request: tessera_protocol::ApprovalRequest {
                request_id: format!(
                    "notebook-edit-{}",
                    input.get("notebook_path").and_then(|v| v.as_str()).unwrap_or("")
                ),
                tool_name: self.name().to_string(),
                description: "Edit Jupyter notebook cell".to_string(),
                risks: vec![],
                allow_remember: true,
                proposed_prefix_pattern: None,
            },
        }
    }

    async fn execute(&self, input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let notebook_path = input["notebook_path"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "notebook_path must be a string",
            }
            .build()
        })?;
        let new_source = input["new_source"].as_str().ok_or_else(|| {
            crate::error::tool_error::InvalidInputSnafu {
                message: "new_source must be a string",
            }
            .build()
        })?;
        let cell_id = input.get("cell_id").and_then(|v| v.as_str());
        let cell_number = input.get("cell_number").and_then(|v| v.as_i64());
        let cell_type = input.get("cell_type").and_then(|v| v.as_str()).unwrap_or("code");
        let edit_mode = input.get("edit_mode").and_then(|v| v.as_str()).unwrap_or("replace");

        let path = ctx.resolve_path(notebook_path);

        if path.extension().is_none_or(|ext| ext != "ipynb") {
            return Err(crate::error::tool_error::ExecutionFailedSnafu {
                message: format!(
                    "NotebookEdit can only be used on .ipynb files: {}",
                    path.display()
                ),
            }
            .build());
        }

        if !ctx.was_file_read(&path).await {
            return Err(crate::error::tool_error::ExecutionFailedSnafu {
                message: format!(
                    "File must be read before editing: {}. Use the Read tool first.",
                    path.display()
                ),
            }
            .build());
        }

        let content = fs::read_to_string(&path).await.map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to read notebook: {e}"),
            }
            .build()
        })?;
        let mut notebook: Notebook = serde_json::from_str(&content).map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to parse notebook: {e}"),
            }
            .build()
        })?;

        match edit_mode {
            "delete" => {
                let idx = Self::find_cell_index(&notebook, cell_id, cell_number)?;
                notebook.cells.remove(idx);
            }
            "insert" => {
                let idx = if cell_id.is_some() {
                    Self::find_cell_index(&notebook, cell_id, cell_number)? + 1
                } else {
                    Self::find_cell_index(&notebook, cell_id, cell_number)?
                };
                let new_cell = Cell {
                    cell_type: cell_type.to_string(),
                    id: None,
                    metadata: serde_json::json!({}),
                    source: source_to_lines(new_source),
                    outputs: if cell_type == "code" {
                        Some(Vec::new())
                    } else {
                        None
                    },
                    execution_count: if cell_type == "code" {
                        Some(Value::Null)
                    } else {
                        None
                    },
                };
                notebook.cells.insert(idx.min(notebook.cells.len()), new_cell);
            }
            _ => {
                let idx = Self::find_cell_index(&notebook, cell_id, cell_number)?;
                notebook.cells[idx].source = source_to_lines(new_source);
            }
        }

        let new_content = serde_json::to_string_pretty(&notebook).map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to serialize notebook: {e}"),
            }
            .build()
        })?;
        fs::write(&path, &new_content).await.map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to write notebook: {e}"),
            }
            .build()
        })?;

        ctx.record_file_modified(&path).await;
        let new_mtime = fs::metadata(&path)
            .await
            .ok()
            .and_then(|m| m.modified().ok());
        ctx.record_file_read_with_state(
            &path,
            FileReadState::complete(new_content.clone(), new_mtime),
        )
        .await;

        let mut result = ToolOutput::text(format!(
            "Successfully applied {edit_mode} to {}",
            path.display()
        ));
        result.modifiers.push(ContextModifier::FileRead {
            path: path.clone(),
            content: new_content,
        });
        Ok(result)
    }
}

#[cfg(test)]
#[path = "notebook_edit.test.rs"]
mod tests;
