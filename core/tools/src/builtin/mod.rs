//! Built-in tools for the agent.

mod prompts;

mod apply_patch;
mod ask_user_question;
mod bash;
mod edit;
mod edit_strategies;
mod enter_plan_mode;
mod exit_plan_mode;
mod glob;
mod grep;
mod kill_shell;
mod ls;
mod lsp;
mod mcp_search;
mod notebook_edit;
mod path_extraction;
mod read;
mod read_many;
mod shell;
mod skill;
mod smart_edit;
mod task;
mod task_output;
mod todo_write;
mod web_fetch;
mod web_search;
mod write;

pub use apply_patch::ApplyPatchTool;
pub use ask_user_question::AskUserQuestionTool;
pub use bash::BashTool;
pub use edit::EditTool;
pub use enter_plan_mode::EnterPlanModeTool;
pub use exit_plan_mode::ExitPlanModeTool;
pub use glob::GlobTool;
pub use grep::GrepTool;
pub use kill_shell::KillShellTool;
pub use ls::LsTool;
pub use lsp::LspTool;
pub use mcp_search::McpSearchTool;
pub use notebook_edit::NotebookEditTool;
pub use read::ReadTool;
pub use read_many::ReadManyFilesTool;
pub use shell::ShellTool;
pub use skill::SkillTool;
pub use smart_edit::SmartEditTool;
pub use task::TaskTool;
pub use task_output::TaskOutputTool;
pub use todo_write::TodoWriteTool;
pub use web_fetch::WebFetchTool;
pub use web_search::WebSearchTool;
pub use write::WriteTool;

use crate::registry::ToolRegistry;

/// Register the standard set of built-in tools with a registry.
///
/// `McpSearchTool` is not included here: it needs a handle to the live MCP
/// tool list, and is registered separately when MCP auto-search kicks in.
pub fn register_builtin_tools(registry: &mut ToolRegistry) {
    registry.register(ReadTool::new());
    registry.register(ReadManyFilesTool::new());
    registry.register(WriteTool::new());
    registry.register(EditTool::new());
    registry.register(SmartEditTool::new());
    registry.register(NotebookEditTool::new());
    registry.register(ApplyPatchTool::new());
    registry.register(GlobTool::new());
    registry.register(GrepTool::new());
    registry.register(LsTool::new());
    registry.register(BashTool::new());
    registry.register(ShellTool::new());
    registry.register(KillShellTool::new());
    registry.register(TaskTool::new());
    registry.register(TaskOutputTool::new());
    registry.register(TodoWriteTool::new());
    registry.register(SkillTool::new());
    registry.register(WebFetchTool::new());
    registry.register(WebSearchTool::new());
    registry.register(EnterPlanModeTool::new());
    registry.register(ExitPlanModeTool::new());
    registry.register(AskUserQuestionTool::new());
    registry.register(LspTool::new());
}

/// Get a list of built-in tool names (excludes `McpSearchTool`, which is
/// registered separately).
pub fn builtin_tool_names() -> Vec<&'static str> {
    vec![
        "Read",
        "ReadManyFiles",
        "Write",
        "Edit",
        "SmartEdit",
        "NotebookEdit",
        "apply_patch",
        "Glob",
        "Grep",
        "LS",
        "Bash",
        "shell",
        "TaskStop",
        "Task",
        "TaskOutput",
        "TodoWrite",
        "Skill",
        "WebFetch",
        "WebSearch",
        "EnterPlanMode",
        "ExitPlanMode",
        "AskUserQuestion",
        "Lsp",
    ]
}
