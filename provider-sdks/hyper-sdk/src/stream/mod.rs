//! Streaming response types: raw events, the accumulated snapshot view,
//! and the [`StreamProcessor`] that turns one into the other.

mod callbacks;
mod events;
mod processor;
mod processor_state;
mod response;
mod snapshot;
mod update;

pub use callbacks::CollectTextCallbacks;
pub use callbacks::PrintCallbacks;
pub use callbacks::StreamCallbacks;
pub use events::StreamErrorEvent;
pub use events::StreamEvent;
pub use processor::StreamProcessor;
pub use response::DEFAULT_IDLE_TIMEOUT;
pub use response::EventStream;
pub use response::StreamConfig;
pub use response::StreamResponse;
pub use snapshot::StreamSnapshot;
pub use snapshot::ThinkingSnapshot;
pub use snapshot::ToolCallSnapshot;
pub use update::StreamUpdate;
