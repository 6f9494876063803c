//! LLM-based extraction of file paths mentioned in shell command output.
//!
//! Lets the fast model role pre-read files a command touched, without
//! requiring the main model to issue an explicit Read call for each one.

use std::path::Path;
use std::path::PathBuf;

use tessera_protocol::ModelRole;
use tessera_protocol::ModelRoles;
#[cfg(test)]
use tessera_protocol::ModelSpec;
use tessera_shell::path_extractor::BoxFuture;
use tessera_shell::path_extractor::PathExtractionResult;
use tessera_shell::path_extractor::PathExtractor;
use tessera_shell::path_extractor::filter_existing_files;
use tessera_shell::path_extractor::truncate_for_extraction;

use crate::context::ModelCallFn;
use crate::context::ModelCallInput;

#[derive(serde::Deserialize)]
struct ExtractedPaths {
    paths: Vec<String>,
}

/// [`PathExtractor`] backed by a structured-output call to the fast model role.
///
/// Disabled (returns empty results without calling out) whenever no fast
/// role is configured or no model call function was installed.
pub struct LlmPathExtractor {
    model_roles: ModelRoles,
    model_call_fn: Option<ModelCallFn>,
}

impl LlmPathExtractor {
    /// Create an extractor using `model_roles` for model selection.
    pub fn new(model_roles: ModelRoles, model_call_fn: Option<ModelCallFn>) -> Self {
        Self {
            model_roles,
            model_call_fn,
        }
    }

    /// Parse newline-separated file paths out of a model response, dropping
    /// prose lines that aren't plausible paths.
    pub fn parse_paths(response: &str) -> Vec<PathBuf> {
        response
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .filter(|line| Self::looks_like_path(line))
            .map(PathBuf::from)
            .collect()
    }

    fn looks_like_path(line: &str) -> bool {
        if line.contains(' ') {
            return false;
        }
        let is_pathlike =
            line.starts_with('/') || line.starts_with("./") || line.starts_with("../");
        is_pathlike || Path::new(line).extension().is_some()
    }
}

impl PathExtractor for LlmPathExtractor {
    fn extract_paths<'a>(
        &'a self,
        command: &'a str,
        output: &'a str,
        cwd: &'a Path,
    ) -> BoxFuture<'a, anyhow::Result<PathExtractionResult>> {
        Box::pin(async move {
            if !self.is_enabled() {
                return Ok(PathExtractionResult::empty());
            }
            let model_call_fn = self.model_call_fn.as_ref().expect("checked by is_enabled");

            let start = std::time::Instant::now();
            let truncated = truncate_for_extraction(output);
            let prompt = format!(
                "Command: {command}\nOutput:\n{truncated}\n\n\
                 List the file paths mentioned above, one per line. Reply with paths only."
            );
            let schema = serde_json::json!({
                "type": "object",
                "properties": {
                    "paths": {
                        "type": "array",
                        "items": { "type": "string" }
                    }
                },
                "required": ["paths"]
            });
            let request =
                hyper_sdk::ObjectRequest::new(vec![hyper_sdk::Message::user(prompt)], schema)
                    .schema_name("ExtractedPaths");

            let paths = match model_call_fn(ModelCallInput { request }).await {
                Ok(model_result) => model_result
                    .response
                    .parse::<ExtractedPaths>()
                    .map(|extracted| extracted.paths.into_iter().map(PathBuf::from).collect())
                    .unwrap_or_default(),
                Err(_) => Vec::new(),
            };

            let paths = filter_existing_files(paths, cwd);
            Ok(PathExtractionResult::new(
                paths,
                start.elapsed().as_millis() as i64,
            ))
        })
    }

    fn is_enabled(&self) -> bool {
        self.model_roles.get(ModelRole::Fast).is_some() && self.model_call_fn.is_some()
    }
}

#[cfg(test)]
#[path = "path_extraction.test.rs"]
mod tests;
