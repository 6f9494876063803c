//! Webhook handler: posts the hook context to an HTTP endpoint.
//!
//! The endpoint receives the full `HookContext` as a JSON POST body and is
//! expected to respond with either a `HookResult` (legacy `action`-tagged
//! format) or a `HookOutput` (the Claude-Code-v2.1.7-compatible format also
//! used by [`crate::handlers::command`]). Any network failure, non-success
//! status, or unparseable body fails open to `HookResult::Continue`.

use std::time::Duration;

use tracing::debug;
use tracing::warn;

use crate::context::HookContext;
use crate::handlers::command::HookOutput;
use crate::result::HookResult;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Sends hook context to an HTTP endpoint.
pub struct WebhookHandler;

impl WebhookHandler {
    /// Posts the context to `url` with the default timeout.
    pub async fn execute(url: &str, ctx: &HookContext) -> HookResult {
        Self::execute_with_timeout(url, ctx, DEFAULT_TIMEOUT_SECS).await
    }

    /// Posts the context to `url`, aborting after `timeout_secs`.
    pub async fn execute_with_timeout(url: &str, ctx: &HookContext, timeout_secs: u64) -> HookResult {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
        {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to build webhook client: {e}");
                return HookResult::Continue;
            }
        };

        debug!(url, event_type = %ctx.event_type, "Posting hook context to webhook");

        let response = match client.post(url).json(ctx).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!(url, "Webhook request failed: {e}");
                return HookResult::Continue;
            }
        };

        if !response.status().is_success() {
            warn!(url, status = %response.status(), "Webhook returned non-success status");
            return HookResult::Continue;
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                warn!(url, "Failed to read webhook response body: {e}");
                return HookResult::Continue;
            }
        };

        parse_webhook_response(url, body.trim())
    }
}

/// Parses a webhook response body, supporting both `HookResult` and
/// `HookOutput` formats.
fn parse_webhook_response(url: &str, body: &str) -> HookResult {
    if body.is_empty() {
        return HookResult::Continue;
    }

    if let Ok(result) = serde_json::from_str::<HookResult>(body) {
        return result;
    }

    if let Ok(output) = serde_json::from_str::<HookOutput>(body) {
        return output.into();
    }

    warn!(url, "Failed to parse webhook response as HookResult or HookOutput");
    HookResult::Continue
}

#[cfg(test)]
#[path = "webhook.test.rs"]
mod tests;
