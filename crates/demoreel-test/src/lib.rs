//! Shared test utilities for demoreel.
//!
//! Test doubles for the [`Demo`](demoreel_core::Demo) capability plus small
//! fixtures. Add as a dev-dependency:
//!
//! ```toml
//! [dev-dependencies]
//! demoreel-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use demoreel_test::{Call, CallLog, RecordingDemo, name};
//!
//! let log = CallLog::new();
//! let mut registry = DemoRegistry::new();
//! registry.register(name("_default"), Box::new(RecordingDemo::new("cap0", &log)))?;
//! // ... drive the selector ...
//! assert_eq!(log.calls(), [Call::run("cap0")]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod fixtures;
mod mocks;

pub use fixtures::{TempCatalog, name, sample_catalog};
pub use mocks::{Call, CallLog, FailingDemo, RecordingDemo};
