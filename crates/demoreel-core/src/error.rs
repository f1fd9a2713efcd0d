//! Demo error types.

use thiserror::Error;

/// Errors raised by a demo or while naming one.
#[derive(Debug, Error)]
pub enum DemoError {
    /// The demo name is not usable as a registry key.
    #[error("Invalid demo name {name:?}: {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// The demo could not be started.
    #[error("Failed to start demo {demo}: {message}")]
    StartFailed {
        /// Name of the demo.
        demo: String,
        /// Failure detail.
        message: String,
    },

    /// The demo could not be stopped.
    #[error("Failed to stop demo {demo}: {message}")]
    StopFailed {
        /// Name of the demo.
        demo: String,
        /// Failure detail.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for demo operations.
pub type DemoResult<T> = Result<T, DemoError>;
