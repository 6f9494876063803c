//! Provider-agnostic chat-completion data model and streaming pipeline.
//!
//! hyper-sdk defines the wire-independent shapes (`Message`, `GenerateRequest`,
//! `GenerateResponse`, `StreamEvent`, ...) and the one seam everything above it
//! is built against: the [`Model`] trait. Nothing here knows how to actually
//! reach a provider's API; that's deliberately out of scope.

pub mod error;
pub mod messages;
pub mod model;
pub mod object;
pub mod options;
pub mod request;
pub mod response;
pub mod stream;
pub mod tools;

pub use error::HyperError;
pub use error::Result;
pub use messages::ContentBlock;
pub use messages::ImageDetail;
pub use messages::ImageSource;
pub use messages::Message;
pub use messages::ProviderMetadata;
pub use messages::Role;
pub use model::Model;
pub use object::ObjectRequest;
pub use object::ObjectResponse;
pub use options::AnthropicOptions;
pub use options::GeminiOptions;
pub use options::OpenAIOptions;
pub use options::ProviderOptions;
pub use options::ProviderOptionsData;
pub use options::VolcengineOptions;
pub use options::ZaiOptions;
pub use options::downcast_options;
pub use options::try_downcast_options;
pub use options::validate_options_for_provider;
pub use request::GenerateRequest;
pub use response::FinishReason;
pub use response::GenerateResponse;
pub use response::TokenUsage;
pub use stream::StreamCallbacks;
pub use stream::StreamEvent;
pub use stream::StreamProcessor;
pub use stream::StreamResponse;
pub use stream::StreamSnapshot;
pub use stream::StreamUpdate;
pub use tools::ToolCall;
pub use tools::ToolChoice;
pub use tools::ToolDefinition;
pub use tools::ToolResultBlock;
pub use tools::ToolResultContent;
