//! Error types for context assembly.

use tessera_error::ErrorExt;
use tessera_error::Location;
use tessera_error::StatusCode;
use tessera_error::stack_trace_debug;
use snafu::Snafu;
use std::any::Any;

/// Context assembly error type.
///
/// Use snafu context selectors from `context_error` module within the crate:
/// ```ignore
/// use crate::error::context_error::*;
///
/// return BuildSnafu { message: "missing environment" }.fail();
/// ```
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub(crate)), module)]
pub enum ContextError {
    /// A requested allocation exceeds the configured token budget.
    #[snafu(display("context budget exceeded: {message}"))]
    BudgetExceeded {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// A budget or environment configuration value is invalid.
    #[snafu(display("invalid context config: {message}"))]
    InvalidConfig {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// The context builder was missing a required input.
    #[snafu(display("failed to build context: {message}"))]
    Build {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ErrorExt for ContextError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BudgetExceeded { .. } => StatusCode::InvalidArguments,
            Self::InvalidConfig { .. } => StatusCode::InvalidConfig,
            Self::Build { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Result type alias for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
