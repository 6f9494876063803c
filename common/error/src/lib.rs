//! Shared error-handling primitives for the workspace.
//!
//! Every crate defines its own `snafu`-derived error enum and implements
//! [`ErrorExt`] on it. This crate supplies the pieces that are otherwise
//! duplicated across those definitions: the closed status-code set, the
//! `#[stack_trace_debug]` macro used to get backtrace-style `Debug` output,
//! and a couple of leaf error types for call sites that don't warrant their
//! own enum variant.

mod ext;
mod status_code;

pub use ext::BoxedError;
pub use ext::ErrorExt;
pub use ext::PlainError;
pub use ext::boxed;
pub use status_code::StatusCategory;
pub use status_code::StatusCode;
pub use status_code::StatusMeta;
pub use tessera_stack_trace_macro::stack_trace_debug;

/// Implicit source-location captured at the `snafu` context-selector call site.
pub type Location = snafu::Location;
