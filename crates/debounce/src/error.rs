//! Error types for debouncer construction

use thiserror::Error;

/// Errors raised while building a debounced wrapper
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DebounceError {
    /// Delay was negative
    #[error("invalid argument: delay must be non-negative, got {delay_ms}ms")]
    InvalidArgument { delay_ms: i64 },

    /// `debounce()` was called outside of a tokio runtime
    #[error("no tokio runtime available to schedule timers")]
    NoRuntime,
}

/// Result type for debounce operations
pub type Result<T> = std::result::Result<T, DebounceError>;
