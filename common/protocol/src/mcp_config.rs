//! MCP tool discovery configuration: when to switch to on-demand search,
//! and how long to cache resolved tool definitions.

use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Controls when MCP tools are offered eagerly vs. via on-demand search.
///
/// As the number/size of MCP tool definitions grows, always including them in
/// the system prompt eats into the context budget. Past `context_threshold`
/// (as a fraction of the context window, converted to characters), tool
/// definitions are deferred to an explicit search tool instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpAutoSearchConfig {
    /// Whether auto-search is enabled at all.
    pub enabled: bool,
    /// Fraction of the context window MCP tool definitions may consume
    /// before switching to on-demand search.
    pub context_threshold: f32,
    /// Minimum context window size (in tokens) auto-search applies to.
    pub min_context_window: i32,
    /// Re-search when the server sends a `tools/list_changed` notification.
    pub search_on_list_changed: bool,
    /// Estimated characters per token, used to convert the threshold to a
    /// character budget.
    pub chars_per_token: f32,
}

impl Default for McpAutoSearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            context_threshold: 0.10,
            min_context_window: 32000,
            search_on_list_changed: true,
            chars_per_token: 2.5,
        }
    }
}

impl McpAutoSearchConfig {
    /// Character budget for MCP tool definitions at the given context window.
    pub fn char_threshold(&self, context_window: i32) -> i32 {
        (self.context_threshold * context_window as f32 * self.chars_per_token) as i32
    }

    /// Whether on-demand search should be used given the current MCP tool
    /// definition size.
    pub fn should_use_auto_search(
        &self,
        context_window: i32,
        mcp_char_count: i32,
        tool_calling_enabled: bool,
    ) -> bool {
        if !self.enabled || !tool_calling_enabled {
            return false;
        }
        if context_window < self.min_context_window {
            return false;
        }
        mcp_char_count > self.char_threshold(context_window)
    }

    /// Validate configured ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.context_threshold) {
            return Err(format!(
                "context_threshold must be between 0.0 and 1.0, got {}",
                self.context_threshold
            ));
        }
        if self.min_context_window < 0 {
            return Err(format!(
                "min_context_window must be non-negative, got {}",
                self.min_context_window
            ));
        }
        Ok(())
    }
}

/// Controls how long resolved MCP tool definitions are cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpToolCacheConfig {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// Time-to-live for cached entries, in seconds.
    pub ttl_secs: i64,
    /// Invalidate the cache when the server sends `tools/list_changed`.
    pub invalidate_on_list_changed: bool,
}

impl Default for McpToolCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 300,
            invalidate_on_list_changed: true,
        }
    }
}

impl McpToolCacheConfig {
    /// The configured TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs.max(0) as u64)
    }

    /// Validate configured ranges.
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl_secs < 0 {
            return Err(format!("ttl_secs must be non-negative, got {}", self.ttl_secs));
        }
        Ok(())
    }
}

/// Top-level MCP tool-handling configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpConfig {
    /// Auto-search configuration.
    pub auto_search: McpAutoSearchConfig,
    /// Tool definition cache configuration.
    pub tool_cache: McpToolCacheConfig,
}

impl McpConfig {
    /// Validate the whole configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.auto_search.validate()?;
        self.tool_cache.validate()?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "mcp_config.test.rs"]
mod tests;
