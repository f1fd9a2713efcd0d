//! Selector error types.

use demoreel_core::{DemoError, DemoName};
use thiserror::Error;

/// Errors that can occur while registering or switching demos.
#[derive(Debug, Error)]
pub enum SelectorError {
    /// The registry holds no demos at all.
    #[error("Demo registry is empty")]
    EmptyRegistry,

    /// The default sentinel is not registered.
    #[error("Default demo {0} is not registered")]
    MissingDefault(DemoName),

    /// The name is not one of the selectable options.
    #[error("Unknown demo: {0}")]
    UnknownDemo(DemoName),

    /// A demo with the same name is already registered.
    #[error("Demo already registered: {0}")]
    AlreadyRegistered(DemoName),

    /// No demo is registered under the name.
    #[error("Demo not registered: {0}")]
    NotRegistered(DemoName),

    /// The demo's `run` failed.
    #[error("Failed to start {demo}: {source}")]
    StartFailed {
        /// The demo that failed to start.
        demo: DemoName,
        /// Underlying demo error.
        #[source]
        source: DemoError,
    },

    /// The demo's `stop` failed.
    #[error("Failed to stop {demo}: {source}")]
    StopFailed {
        /// The demo that failed to stop.
        demo: DemoName,
        /// Underlying demo error.
        #[source]
        source: DemoError,
    },

    /// The selector task is no longer running.
    #[error("Selector service has shut down")]
    ServiceClosed,
}

/// Result type for selector operations.
pub type SelectorResult<T> = Result<T, SelectorError>;
