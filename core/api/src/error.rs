//! Error types returned by the model client.
//!
//! Mirrors [`hyper_sdk::HyperError`] but classified the way the rest of the
//! workspace classifies errors: a closed [`StatusCode`](tessera_error::StatusCode)
//! plus the retry/backoff hints `RetryContext` and `UnifiedStream` need.

use std::time::Duration;

use snafu::Snafu;
use tessera_error::ErrorExt;
use tessera_error::Location;
use tessera_error::StatusCode;
use tessera_error::stack_trace_debug;

/// Errors produced by [`crate::client::ApiClient`] and the streaming pipeline.
#[stack_trace_debug]
#[derive(Snafu)]
#[snafu(visibility(pub), module(api_error))]
pub enum ApiError {
    /// Transport-level failure (connection reset, DNS, timeout).
    #[snafu(display("network error: {message}"))]
    Network {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Provider rejected the request for exceeding its rate limit.
    #[snafu(display("rate limited: {message}"))]
    RateLimited {
        message: String,
        retry_after_ms: i64,
        #[snafu(implicit)]
        location: Location,
    },

    /// Provider is temporarily overloaded; safe to retry with backoff.
    #[snafu(display("provider overloaded: {message}"))]
    Overloaded {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Invalid or missing credentials.
    #[snafu(display("authentication failed: {message}"))]
    Authentication {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// The request itself was malformed; retrying will not help.
    #[snafu(display("invalid request: {message}"))]
    InvalidRequest {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// The conversation no longer fits in the model's context window.
    #[snafu(display("context window exceeded: {message}"))]
    ContextOverflow {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// A streaming response failed mid-flight.
    #[snafu(display("stream error: {message}"))]
    Stream {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// No stream events were received within the idle timeout.
    #[snafu(display("stream idle timeout after {timeout_secs}s"))]
    StreamIdleTimeout {
        timeout_secs: i64,
        #[snafu(implicit)]
        location: Location,
    },

    /// The provider returned a structured error payload that doesn't map to
    /// one of the classified variants above.
    #[snafu(display("provider error {code}: {message}"))]
    Provider {
        code: String,
        message: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Retries were exhausted before the request succeeded.
    #[snafu(display("retries exhausted after {attempts} attempts: {last_error}"))]
    RetriesExhausted {
        attempts: i32,
        last_error: String,
        #[snafu(implicit)]
        location: Location,
    },

    /// Catch-all for SDK-internal failures that aren't one of the above.
    #[snafu(display("internal error: {message}"))]
    Internal {
        message: String,
        #[snafu(implicit)]
        location: Location,
    },
}

impl ApiError {
    /// Transport-level failure constructor.
    pub fn network(message: impl Into<String>) -> Self {
        NetworkSnafu {
            message: message.into(),
        }
        .build()
    }

    /// Rate-limit constructor with a suggested retry delay in milliseconds.
    pub fn rate_limited(message: impl Into<String>, retry_after_ms: i64) -> Self {
        RateLimitedSnafu {
            message: message.into(),
            retry_after_ms,
        }
        .build()
    }

    /// Overload constructor.
    pub fn overloaded(message: impl Into<String>) -> Self {
        OverloadedSnafu {
            message: message.into(),
        }
        .build()
    }

    /// Authentication-failure constructor.
    pub fn authentication(message: impl Into<String>) -> Self {
        AuthenticationSnafu {
            message: message.into(),
        }
        .build()
    }

    /// Streaming-failure constructor.
    pub fn stream(message: impl Into<String>) -> Self {
        StreamSnafu {
            message: message.into(),
        }
        .build()
    }

    /// Retries-exhausted constructor.
    pub fn retries_exhausted(attempts: i32, last_error: impl Into<String>) -> Self {
        RetriesExhaustedSnafu {
            attempts,
            last_error: last_error.into(),
        }
        .build()
    }

    /// Whether this error is worth retrying.
    pub fn is_retryable(&self) -> bool {
        self.status_code().is_retryable()
    }

    /// Suggested delay before retrying, if the error carries one.
    pub fn retry_delay(&self) -> Option<Duration> {
        match self {
            ApiError::RateLimited { retry_after_ms, .. } => {
                Some(Duration::from_millis((*retry_after_ms).max(0) as u64))
            }
            _ => None,
        }
    }

    /// Whether this error means the conversation no longer fits in context.
    pub fn is_context_overflow(&self) -> bool {
        matches!(self, ApiError::ContextOverflow { .. })
    }

    /// Whether this error originated from the streaming pipeline specifically.
    pub fn is_stream_error(&self) -> bool {
        matches!(self, ApiError::Stream { .. } | ApiError::StreamIdleTimeout { .. })
    }
}

impl ErrorExt for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Network { .. } => StatusCode::NetworkError,
            ApiError::RateLimited { .. } => StatusCode::RateLimited,
            ApiError::Overloaded { .. } => StatusCode::ServiceUnavailable,
            ApiError::Authentication { .. } => StatusCode::AuthenticationFailed,
            ApiError::InvalidRequest { .. } => StatusCode::InvalidRequest,
            ApiError::ContextOverflow { .. } => StatusCode::InvalidArguments,
            ApiError::Stream { .. } => StatusCode::StreamError,
            ApiError::StreamIdleTimeout { .. } => StatusCode::Timeout,
            ApiError::Provider { .. } => StatusCode::ProviderError,
            ApiError::RetriesExhausted { .. } => StatusCode::Internal,
            ApiError::Internal { .. } => StatusCode::Internal,
        }
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

impl From<hyper_sdk::HyperError> for ApiError {
    fn from(err: hyper_sdk::HyperError) -> Self {
        use hyper_sdk::HyperError;

        match err {
            HyperError::NetworkError(message) => ApiError::network(message),
            HyperError::RateLimitExceeded(message) => {
                let retry_after_ms = hyper_sdk::error::parse_retry_after(&message)
                    .map(|d| d.as_millis() as i64)
                    .unwrap_or(0);
                ApiError::rate_limited(message, retry_after_ms)
            }
            HyperError::AuthenticationFailed(message) => ApiError::authentication(message),
            HyperError::InvalidRequest(message) => InvalidRequestSnafu { message }.build(),
            HyperError::ContextWindowExceeded(message) => {
                ContextOverflowSnafu { message }.build()
            }
            HyperError::StreamError(message) => ApiError::stream(message),
            HyperError::StreamIdleTimeout(duration) => StreamIdleTimeoutSnafu {
                timeout_secs: duration.as_secs() as i64,
            }
            .build(),
            HyperError::ProviderError { code, message } => ProviderSnafu { code, message }.build(),
            HyperError::Retryable { message, delay } => {
                let retry_after_ms = delay.map(|d| d.as_millis() as i64).unwrap_or(0);
                ApiError::rate_limited(message, retry_after_ms)
            }
            other => InternalSnafu {
                message: other.to_string(),
            }
            .build(),
        }
    }
}

/// Result type alias for the client and streaming pipeline.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
#[path = "error.test.rs"]
mod tests;
