//! Error types for sandbox enforcement.

use tessera_error::ErrorExt;
use tessera_error::Location;
use tessera_error::StatusCode;
use tessera_error::stack_trace_debug;
use snafu::Snafu;

/// Sandbox enforcement errors.
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum SandboxError {
    /// A path write was denied by the current sandbox mode.
    #[snafu(display("Write denied: {message}"))]
    WriteDenied {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// A path was denied outright (not on the allow list, or explicitly denied).
    #[snafu(display("Path denied: {path}"))]
    PathDenied {
        path: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Network access was denied by the current sandbox mode.
    #[snafu(display("Network access denied"))]
    NetworkDenied {
        #[snafu(implicit)]
        location: Location,
    },

    /// The platform sandbox could not be applied.
    #[snafu(display("Failed to apply sandbox: {message}"))]
    ApplyFailed {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for SandboxError {
    fn status_code(&self) -> StatusCode {
        match self {
            SandboxError::WriteDenied { .. } => StatusCode::PermissionDenied,
            SandboxError::PathDenied { .. } => StatusCode::PermissionDenied,
            SandboxError::NetworkDenied { .. } => StatusCode::PermissionDenied,
            SandboxError::ApplyFailed { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

/// Result type for sandbox operations.
pub type Result<T> = std::result::Result<T, SandboxError>;
