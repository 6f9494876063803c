//! Error types for the hook system.

use snafu::Snafu;
use tessera_error::ErrorExt;
use tessera_error::Location;
use tessera_error::StatusCode;
use tessera_error::stack_trace_debug;

/// Hook system errors.
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum HookError {
    /// A matcher's configuration is invalid (e.g. an unparseable regex).
    #[snafu(display("Invalid matcher: {message}"))]
    InvalidMatcher {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// A hook definitions file failed to load or parse.
    #[snafu(display("Failed to load hooks: {message}"))]
    LoadFailed {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for HookError {
    fn status_code(&self) -> StatusCode {
        match self {
            HookError::InvalidMatcher { .. } => StatusCode::InvalidArguments,
            HookError::LoadFailed { .. } => StatusCode::InvalidArguments,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type for hook operations.
pub type Result<T> = std::result::Result<T, HookError>;
