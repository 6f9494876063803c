//! Error types for plan mode.

use tessera_error::ErrorExt;
use tessera_error::Location;
use tessera_error::StatusCode;
use tessera_error::stack_trace_debug;
use snafu::Snafu;
use std::any::Any;

/// Plan mode error type.
///
/// Use snafu context selectors from `plan_mode_error` module within the crate:
/// ```ignore
/// use crate::error::plan_mode_error::*;
/// use snafu::ResultExt;
///
/// fs::create_dir_all(&dir).context(CreateDirSnafu { message: "plan dir" })?;
/// ```
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum PlanModeError {
    /// No home directory could be resolved.
    #[snafu(display("Could not determine home directory"))]
    NoHomeDir {
        #[snafu(implicit)]
        location: Location,
    },

    /// Failed to create the plan directory.
    #[snafu(display("Failed to create plan directory: {message}"))]
    CreateDir {
        message: String,
        #[snafu(source)]
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },

    /// Failed to read or write the plan file.
    #[snafu(display("Plan file I/O error: {message}"))]
    Io {
        message: String,
        #[snafu(source)]
        source: std::io::Error,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for PlanModeError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NoHomeDir { .. } => StatusCode::InvalidConfig,
            Self::CreateDir { .. } | Self::Io { .. } => StatusCode::IoError,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Result type alias for plan mode operations.
pub type Result<T> = std::result::Result<T, PlanModeError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
