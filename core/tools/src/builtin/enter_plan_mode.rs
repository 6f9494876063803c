//! EnterPlanMode tool: switches the session into read-only plan mode.

use super::prompts;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_plan_mode::PlanFileManager;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::PermissionResult;
use tessera_protocol::ToolOutput;
use serde_json::Value;

/// Tool that enters plan mode, confining future writes to a single plan file.
pub struct EnterPlanModeTool;

impl EnterPlanModeTool {
    /// Create a new EnterPlanMode tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnterPlanModeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for EnterPlanModeTool {
    fn name(&self) -> &str {
        "EnterPlanMode"
    }

    fn description(&self) -> &str {
        prompts::ENTER_PLAN_MODE_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    async fn execute(&self, _input: Value, ctx: &mut ToolContext) -> Result<ToolOutput> {
        let manager = match ctx.agent_id.as_deref() {
            Some(agent_id) => PlanFileManager::for_agent(ctx.session_id.clone(), agent_id),
            None => PlanFileManager::new(ctx.session_id.clone()),
        };

        let plan_path = manager.ensure_and_get_path().map_err(|e| {
            crate::error::tool_error::ExecutionFailedSnafu {
                message: format!("Failed to prepare plan file: {e}"),
            }
            .build()
        })?;

        ctx.is_plan_mode = true;
        ctx.plan_file_path = Some(plan_path.clone());

        Ok(ToolOutput::text(format!(
            "Entered plan mode. Plan file: {}\n\n\
             While in plan mode, the Write tool and Edit tool may only modify this plan file. \
             Draft your plan there, then exit plan mode once it is ready for review.",
            plan_path.display()
        )))
    }
}

#[cfg(test)]
#[path = "enter_plan_mode.test.rs"]
mod tests;
