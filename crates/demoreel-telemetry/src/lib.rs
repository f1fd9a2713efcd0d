//! Logging setup for demoreel.
//!
//! # Example
//!
//! ```rust,no_run
//! use demoreel_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), demoreel_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("demoreel_loader=trace");
//!
//! setup_logging(&config)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    FileLogConfig, FileRotation, LogConfig, LogFormat, LogTarget, setup_default_logging,
    setup_logging,
};
