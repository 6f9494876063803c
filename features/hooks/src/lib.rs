//! Lifecycle hook system.
//!
//! A [`HookRegistry`] holds [`HookDefinition`]s keyed by [`HookEventType`]
//! and, when an event fires, runs every matching hook concurrently and
//! collects their [`HookOutcome`]s. Hooks can come from policy files, plugins,
//! the active session, or a loaded skill; [`HookAggregator`] combines them and
//! orders them by [`scope::HookScope`] priority before they're registered.
//!
//! ```no_run
//! use std::path::PathBuf;
//! use tessera_hooks::{HookContext, HookRegistry};
//! use tessera_hooks::event::HookEventType;
//!
//! # async fn example() {
//! let registry = HookRegistry::new();
//! let ctx = HookContext::new(
//!     HookEventType::PreToolUse,
//!     "session-1".to_string(),
//!     PathBuf::from("/tmp"),
//! )
//! .with_tool_name("bash");
//! let outcomes = registry.execute(&ctx).await;
//! assert!(outcomes.is_empty());
//! # }
//! ```

pub mod aggregator;
pub mod async_tracker;
pub mod config;
pub mod context;
pub mod definition;
pub mod error;
pub mod event;
pub mod handlers;
pub mod matcher;
pub mod registry;
pub mod result;
pub mod scope;
pub mod settings;

pub use aggregator::HookAggregator;
pub use aggregator::aggregate_hooks;
pub use async_tracker::AsyncHookTracker;
pub use async_tracker::CompletedAsyncHook;
pub use async_tracker::PendingAsyncHook;
pub use config::load_hooks_from_json;
pub use context::HookContext;
pub use definition::HookDefinition;
pub use definition::HookHandler;
pub use definition::MAX_TIMEOUT_SECS;
pub use error::HookError;
pub use error::Result;
pub use event::HookEventType;
pub use matcher::HookMatcher;
pub use registry::HookRegistry;
pub use result::HookOutcome;
pub use result::HookResult;
pub use scope::HookScope;
pub use scope::HookSource;
pub use settings::HookSettings;
