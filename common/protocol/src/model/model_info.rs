//! Resolved per-model configuration.

use super::ReasoningSummary;
use crate::ThinkingLevel;
use crate::tool_config::ApplyPatchToolType;
use serde::Deserialize;
use serde::Serialize;
use std::collections::HashMap;

use super::ConfigShellToolType;

/// A capability a model may advertise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Plain text generation.
    TextGeneration,
    /// Streamed responses.
    Streaming,
    /// Image input.
    Vision,
    /// Audio input.
    Audio,
    /// Function/tool calling.
    ToolCalling,
    /// Multiple tool calls in a single turn.
    ParallelToolCalls,
    /// JSON-schema-constrained output.
    StructuredOutput,
    /// Extended thinking / reasoning traces.
    ExtendedThinking,
    /// Reasoning summaries alongside extended thinking.
    ReasoningSummaries,
}

/// Fully resolved configuration for a single model.
///
/// Built by layering built-in defaults, provider config, and user overrides;
/// see `common/config`'s resolver for the merge order. Unset (`None`) fields
/// mean "not configured at this layer", distinct from an explicit falsy value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier as used in API requests.
    #[serde(default)]
    pub slug: String,

    /// Human-readable display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Base system instructions/prompt for this model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_instructions: Option<String>,

    /// Maximum context window in tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_window: Option<i64>,

    /// Maximum output tokens per response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i64>,

    /// Capabilities this model advertises.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capabilities: Option<Vec<Capability>>,

    /// Sampling temperature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Request timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<i64>,

    /// Percentage of the context window at which auto-compaction kicks in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_compact_pct: Option<i32>,

    /// Default thinking level if the caller doesn't request one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_thinking_level: Option<ThinkingLevel>,

    /// Thinking levels this model actually supports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supported_thinking_levels: Option<Vec<ThinkingLevel>>,

    /// Reasoning summary mode, for models supporting it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_summary: Option<ReasoningSummary>,

    /// Shell tool wire format this model expects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell_type: Option<ConfigShellToolType>,

    /// apply_patch tool wire format this model expects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_patch_tool_type: Option<ApplyPatchToolType>,

    /// Tool names excluded for this model (e.g. unsupported edit tools).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_tools: Option<Vec<String>>,

    /// Maximum characters kept from a single tool result before truncation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tool_output_chars: Option<i32>,

    /// Free-form provider-specific request options (e.g. `response_format`, `seed`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, serde_json::Value>>,
}

impl ModelInfo {
    /// Start building a model config from scratch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `other` into `self`. Set fields in `other` take precedence;
    /// `options` maps are merged key-by-key rather than replaced wholesale.
    pub fn merge_from(&mut self, other: &ModelInfo) {
        if other.display_name.is_some() {
            self.display_name = other.display_name.clone();
        }
        if other.base_instructions.is_some() {
            self.base_instructions = other.base_instructions.clone();
        }
        if other.context_window.is_some() {
            self.context_window = other.context_window;
        }
        if other.max_output_tokens.is_some() {
            self.max_output_tokens = other.max_output_tokens;
        }
        if other.capabilities.is_some() {
            self.capabilities = other.capabilities.clone();
        }
        if other.temperature.is_some() {
            self.temperature = other.temperature;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.auto_compact_pct.is_some() {
            self.auto_compact_pct = other.auto_compact_pct;
        }
        if other.default_thinking_level.is_some() {
            self.default_thinking_level = other.default_thinking_level.clone();
        }
        if other.supported_thinking_levels.is_some() {
            self.supported_thinking_levels = other.supported_thinking_levels.clone();
        }
        if other.reasoning_summary.is_some() {
            self.reasoning_summary = other.reasoning_summary;
        }
        if other.shell_type.is_some() {
            self.shell_type = other.shell_type;
        }
        if other.apply_patch_tool_type.is_some() {
            self.apply_patch_tool_type = other.apply_patch_tool_type;
        }
        if other.excluded_tools.is_some() {
            self.excluded_tools = other.excluded_tools.clone();
        }
        if other.max_tool_output_chars.is_some() {
            self.max_tool_output_chars = other.max_tool_output_chars;
        }
        if let Some(other_opts) = &other.options {
            let merged = self.options.get_or_insert_with(HashMap::new);
            for (k, v) in other_opts {
                merged.insert(k.clone(), v.clone());
            }
        }
    }

    /// Check whether this model advertises `capability`.
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities
            .as_ref()
            .is_some_and(|caps| caps.contains(&capability))
    }

    /// Find the supported thinking level nearest to `requested` by effort.
    ///
    /// Returns `None` if no thinking levels are configured as supported.
    pub fn nearest_supported_level(&self, requested: &ThinkingLevel) -> Option<ThinkingLevel> {
        let supported = self.supported_thinking_levels.as_ref()?;
        supported
            .iter()
            .min_by_key(|level| (level.effort as i32 - requested.effort as i32).abs())
            .cloned()
    }

    /// Resolve `requested` against the supported levels, falling back to
    /// `requested` unchanged if no supported levels are configured.
    pub fn resolve_thinking_level(&self, requested: &ThinkingLevel) -> ThinkingLevel {
        self.nearest_supported_level(requested)
            .unwrap_or_else(|| requested.clone())
    }

    /// Look up a single request option by key.
    pub fn get_request_option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.as_ref()?.get(key)
    }

    /// Builder: set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Builder: set the context window.
    pub fn with_context_window(mut self, tokens: i64) -> Self {
        self.context_window = Some(tokens);
        self
    }

    /// Builder: set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Builder: set the request timeout in seconds.
    pub fn with_timeout_secs(mut self, secs: i64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Builder: set the advertised capabilities.
    pub fn with_capabilities(mut self, capabilities: Vec<Capability>) -> Self {
        self.capabilities = Some(capabilities);
        self
    }

    /// Builder: set the default thinking level.
    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.default_thinking_level = Some(level);
        self
    }

    /// Builder: set free-form request options.
    pub fn with_request_options(
        mut self,
        options: HashMap<String, serde_json::Value>,
    ) -> Self {
        self.options = Some(options);
        self
    }
}

#[cfg(test)]
#[path = "model_info.test.rs"]
mod tests;
