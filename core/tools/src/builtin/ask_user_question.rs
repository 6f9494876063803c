//! AskUserQuestion tool: presents multiple-choice questions to the user.

use super::prompts;
use crate::context::ToolContext;
use crate::error::Result;
use crate::tool::Tool;
use async_trait::async_trait;
use tessera_protocol::ConcurrencySafety;
use tessera_protocol::PermissionResult;
use tessera_protocol::ToolOutput;
use serde::Deserialize;
use serde_json::Value;

/// Minimum number of options a question must offer.
const MIN_OPTIONS: usize = 2;

#[derive(Debug, Deserialize)]
struct QuestionOption {
    label: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct Question {
    question: String,
    header: String,
    options: Vec<QuestionOption>,
    #[serde(rename = "multiSelect", default)]
    multi_select: bool,
}

#[derive(Debug, Deserialize)]
struct AskUserQuestionInput {
    questions: Vec<Question>,
    #[serde(default)]
    answers: std::collections::HashMap<String, Value>,
}

/// Tool for posing one or more multiple-choice questions to the user.
pub struct AskUserQuestionTool;

impl AskUserQuestionTool {
    /// Create a new AskUserQuestion tool.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AskUserQuestionTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for AskUserQuestionTool {
    fn name(&self) -> &str {
        "AskUserQuestion"
    }

    fn description(&self) -> &str {
        prompts::ASK_USER_QUESTION_DESCRIPTION
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": { "type": "string" },
                            "header": { "type": "string" },
                            "options": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "label": { "type": "string" },
                                        "description": { "type": "string" }
                                    },
                                    "required": ["label", "description"]
                                }
                            },
                            "multiSelect": { "type": "boolean", "default": false }
                        },
                        "required": ["question", "header", "options"]
                    }
                },
                "answers": {
                    "type": "object",
                    "description": "Pre-filled answers keyed by question header"
                }
            },
            "required": ["questions"]
        })
    }

    fn concurrency_safety(&self) -> ConcurrencySafety {
        ConcurrencySafety::Unsafe
    }

    fn is_read_only(&self) -> bool {
        false
    }

    async fn check_permission(&self, _input: &Value, _ctx: &ToolContext) -> PermissionResult {
        PermissionResult::Allowed
    }

    async fn execute(&self, input: Value, _ctx: &mut ToolContext) -> Result<ToolOutput> {
        let parsed: AskUserQuestionInput = serde_json::from_value(input).map_err(|e| {
            crate::error::tool_error::InvalidInputSnafu {
                message: format!("Invalid input: {e}"),
            }
            .build()
        })?;

        if parsed.questions.is_empty() {
            return Err(crate::error::tool_error::InvalidInputSnafu {
                message: "questions must not be empty",
            }
            .build());
        }

        for q in &parsed.questions {
            if q.options.len() < MIN_OPTIONS {
                return Err(crate::error::tool_error::InvalidInputSnafu {
                    message: format!(
                        "Question '{}' must offer at least {MIN_OPTIONS} options",
                        q.header
                    ),
                }
                .build());
            }
        }

        let mut output = String::new();
        for q in &parsed.questions {
            output.push_str(&format!("## {}\n\n{}\n\n", q.header, q.question));
            for (i, opt) in q.options.iter().enumerate() {
                output.push_str(&format!("{}. {} — {}\n", i + 1, opt.label, opt.description));
            }
            if q.multi_select {
                output.push_str("\n(Multiple options may be selected.)\n");
            }
            if let Some(answer) = parsed.answers.get(&q.header) {
                let answer_str = answer.as_str().map(str::to_string).unwrap_or_else(|| answer.to_string());
                output.push_str(&format!("\nSelected: {answer_str}\n"));
            }
            output.push('\n');
        }

        Ok(ToolOutput::text(output.trim_end().to_string()))
    }
}

#[cfg(test)]
#[path = "ask_user_question.test.rs"]
mod tests;
