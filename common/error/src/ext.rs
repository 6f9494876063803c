//! Extension trait shared by every `snafu`-derived error enum in the workspace.
//!
//! Crates define their own error type with `#[derive(Snafu)]` and implement
//! [`ErrorExt`] on it rather than hand-rolling status-code mapping and
//! user-facing message redaction in each crate.

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;

use crate::status_code::StatusCode;

/// Behavior every workspace error type exposes on top of `std::error::Error`.
pub trait ErrorExt: StdError + Send + Sync + 'static {
    /// The status code this error maps to, used for wire responses and metrics.
    fn status_code(&self) -> StatusCode;

    /// Downcasting hook, needed by callers that match on concrete error types
    /// behind a `dyn ErrorExt`.
    fn as_any(&self) -> &dyn Any;

    /// Whether retrying the operation that produced this error might succeed.
    fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// Message safe to surface to an end user or external caller.
    ///
    /// Errors whose status code is flagged `log_error` are assumed to carry
    /// internal detail (stack traces, file paths, provider payloads) and are
    /// replaced with a generic message carrying only the status code.
    fn output_msg(&self) -> String {
        let code = self.status_code();
        if code.should_log_error() {
            format!("Internal error: {}", code as i32)
        } else {
            self.to_string()
        }
    }
}

/// A minimal leaf error carrying just a message and a status code.
///
/// Used at call sites that need to construct an `ErrorExt` value without
/// defining a dedicated enum variant (e.g. converting a third-party error
/// whose concrete type isn't otherwise meaningful to the caller).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainError {
    message: String,
    status_code: StatusCode,
}

impl PlainError {
    /// Create a new plain error.
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self {
            message: message.into(),
            status_code,
        }
    }
}

impl fmt::Display for PlainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for PlainError {}

impl ErrorExt for PlainError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A type-erased error paired with a status code.
///
/// Wraps any third-party `std::error::Error` so it can flow through code
/// that speaks in terms of [`ErrorExt`] without every crate needing its own
/// `From<ThirdPartyError>` conversion.
pub struct BoxedError {
    inner: Box<dyn StdError + Send + Sync + 'static>,
    status_code: StatusCode,
}

impl fmt::Debug for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl fmt::Display for BoxedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl StdError for BoxedError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl ErrorExt for BoxedError {
    fn status_code(&self) -> StatusCode {
        self.status_code
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Box up a third-party error under a given status code.
pub fn boxed(err: impl StdError + Send + Sync + 'static, status_code: StatusCode) -> BoxedError {
    BoxedError {
        inner: Box::new(err),
        status_code,
    }
}

#[cfg(test)]
#[path = "ext.test.rs"]
mod tests;
