//! Low-level streaming response wrapper.
//!
//! [`StreamResponse`] wraps a raw event stream with idle-timeout handling.
//! Most callers want the higher-level [`StreamProcessor`](super::StreamProcessor)
//! instead, reached via [`StreamResponse::into_processor`].

use std::pin::Pin;
use std::time::Duration;

use futures::Stream;
use futures::StreamExt;
use tokio::time::timeout;

use crate::error::HyperError;
use crate::response::FinishReason;
use crate::response::GenerateResponse;

use super::StreamEvent;
use super::StreamProcessor;

/// Default idle timeout applied to a stream with no events.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// A boxed stream of raw provider events.
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, HyperError>> + Send>>;

/// Configuration for [`StreamResponse`] and [`StreamProcessor`](super::StreamProcessor).
#[derive(Debug, Clone, Copy)]
pub struct StreamConfig {
    /// How long to wait for the next event before failing with
    /// [`HyperError::StreamIdleTimeout`].
    pub idle_timeout: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}

/// A raw streaming response with idle-timeout enforcement.
pub struct StreamResponse {
    inner: EventStream,
    config: StreamConfig,
}

impl StreamResponse {
    /// Wrap an event stream with the default configuration.
    pub fn new(inner: EventStream) -> Self {
        Self {
            inner,
            config: StreamConfig::default(),
        }
    }

    /// Wrap an event stream with custom configuration.
    pub fn with_config(inner: EventStream, config: StreamConfig) -> Self {
        Self { inner, config }
    }

    /// Set the idle timeout.
    pub fn idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.config.idle_timeout = idle_timeout;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Get the next raw event, respecting the idle timeout.
    pub async fn next_event(&mut self) -> Option<Result<StreamEvent, HyperError>> {
        match timeout(self.config.idle_timeout, self.inner.next()).await {
            Ok(Some(event)) => Some(event),
            Ok(None) => None,
            Err(_) => Some(Err(HyperError::StreamIdleTimeout(self.config.idle_timeout))),
        }
    }

    /// Upgrade to the higher-level [`StreamProcessor`](super::StreamProcessor).
    pub fn into_processor(self) -> StreamProcessor {
        StreamProcessor::with_config(self.inner, self.config)
    }

    /// Consume the stream, returning only the accumulated assistant text.
    pub async fn get_final_text(self) -> Result<String, HyperError> {
        let response = self.get_final_response().await?;
        Ok(response.text())
    }

    /// Consume the stream, returning the final accumulated response.
    pub async fn get_final_response(self) -> Result<GenerateResponse, HyperError> {
        self.into_processor().collect().await
    }

    /// Stream of assistant text deltas only.
    pub fn text_stream(self) -> impl Stream<Item = Result<String, HyperError>> {
        let processor = self.into_processor();
        futures::stream::unfold(processor, |mut processor| async move {
            loop {
                match processor.next().await {
                    Some(Ok((update, _))) => {
                        if let Some(delta) = update.as_text_delta() {
                            return Some((Ok(delta.to_string()), processor));
                        }
                    }
                    Some(Err(e)) => return Some((Err(e), processor)),
                    None => return None,
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "response.test.rs"]
mod tests;
