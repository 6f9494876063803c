//! Volcengine Ark-specific options.

use super::ProviderMarker;
use super::ProviderOptionsData;
use super::TypedProviderOptions;
use serde::Deserialize;
use serde::Serialize;
use std::any::Any;

/// Reasoning effort level, shared between Volcengine Ark and compatible providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    Medium,
    High,
}

/// Volcengine Ark-specific options.
#[derive(Debug, Clone, Default)]
pub struct VolcengineOptions {
    /// Extended thinking budget tokens.
    pub thinking_budget_tokens: Option<i32>,
    /// Previous response ID for conversation continuity.
    pub previous_response_id: Option<String>,
    /// Whether prompt caching is enabled for this request.
    pub caching_enabled: Option<bool>,
    /// Reasoning effort level.
    pub reasoning_effort: Option<ReasoningEffort>,
}

impl VolcengineOptions {
    /// Create new Volcengine Ark options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set thinking budget in tokens.
    pub fn with_thinking_budget(mut self, tokens: i32) -> Self {
        self.thinking_budget_tokens = Some(tokens);
        self
    }

    /// Set the previous response ID for conversation continuity.
    pub fn with_previous_response_id(mut self, id: impl Into<String>) -> Self {
        self.previous_response_id = Some(id.into());
        self
    }

    /// Enable or disable prompt caching.
    pub fn with_caching(mut self, enabled: bool) -> Self {
        self.caching_enabled = Some(enabled);
        self
    }

    /// Set the reasoning effort level.
    pub fn with_reasoning_effort(mut self, effort: ReasoningEffort) -> Self {
        self.reasoning_effort = Some(effort);
        self
    }

    /// Convert to boxed ProviderOptions.
    pub fn boxed(self) -> Box<dyn ProviderOptionsData> {
        Box::new(self)
    }
}

impl ProviderMarker for VolcengineOptions {
    const PROVIDER_NAME: &'static str = "volcengine";
}

impl TypedProviderOptions for VolcengineOptions {}

impl ProviderOptionsData for VolcengineOptions {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn ProviderOptionsData> {
        Box::new(self.clone())
    }

    fn provider_name(&self) -> Option<&'static str> {
        Some(Self::PROVIDER_NAME)
    }
}

#[cfg(test)]
#[path = "volcengine.test.rs"]
mod tests;
