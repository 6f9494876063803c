//! Google Gemini-specific options.

use super::ProviderMarker;
use super::ProviderOptionsData;
use super::TypedProviderOptions;
use serde::Deserialize;
use serde::Serialize;
use std::any::Any;

/// Gemini extended-thinking effort level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThinkingLevel {
    Low,
    Medium,
    High,
}

/// Harm category used by Gemini safety settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

/// Blocking threshold used by Gemini safety settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// A single Gemini safety setting entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// Google Gemini-specific options.
#[derive(Debug, Clone, Default)]
pub struct GeminiOptions {
    /// Extended thinking effort level.
    pub thinking_level: Option<ThinkingLevel>,
    /// Whether to include the model's thoughts in the response.
    pub include_thoughts: Option<bool>,
    /// Whether to ground responses with Google Search.
    pub grounding: Option<bool>,
    /// Per-category safety thresholds.
    pub safety_settings: Option<Vec<SafetySetting>>,
}

impl GeminiOptions {
    /// Create new Gemini options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the extended-thinking effort level.
    pub fn with_thinking_level(mut self, level: ThinkingLevel) -> Self {
        self.thinking_level = Some(level);
        self
    }

    /// Include the model's thoughts in the response.
    pub fn with_include_thoughts(mut self, enabled: bool) -> Self {
        self.include_thoughts = Some(enabled);
        self
    }

    /// Enable or disable Google Search grounding.
    pub fn with_grounding(mut self, enabled: bool) -> Self {
        self.grounding = Some(enabled);
        self
    }

    /// Set per-category safety thresholds.
    pub fn with_safety_settings(mut self, settings: Vec<SafetySetting>) -> Self {
        self.safety_settings = Some(settings);
        self
    }

    /// Convert to boxed ProviderOptions.
    pub fn boxed(self) -> Box<dyn ProviderOptionsData> {
        Box::new(self)
    }
}

impl ProviderMarker for GeminiOptions {
    const PROVIDER_NAME: &'static str = "gemini";
}

impl TypedProviderOptions for GeminiOptions {}

impl ProviderOptionsData for GeminiOptions {
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
#[path = "gemini.test.rs"]
mod tests;
