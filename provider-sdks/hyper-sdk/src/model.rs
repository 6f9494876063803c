//! The pluggable chat-completion model handle.
//!
//! [`Model`] is the one seam the rest of hyper-sdk, and everything built on
//! top of it, is written against. A concrete provider is just something that
//! implements this trait; nothing in this crate depends on which one.

use async_trait::async_trait;

use crate::error::HyperError;
use crate::request::GenerateRequest;
use crate::response::GenerateResponse;
use crate::stream::StreamResponse;

/// A single chat-completion model, addressable by ID, that can generate a
/// complete response or stream one incrementally.
#[async_trait]
pub trait Model: Send + Sync {
    /// Identifier the model is addressed by (e.g. `"claude-opus-4"`).
    fn model_id(&self) -> &str;

    /// Generate a complete response in one shot.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, HyperError>;

    /// Generate a response as a stream of incremental events.
    async fn stream(&self, request: GenerateRequest) -> Result<StreamResponse, HyperError>;
}

#[cfg(test)]
#[path = "model.test.rs"]
mod tests;
