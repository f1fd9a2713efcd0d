//! Core types for the demoreel gallery.
//!
//! A demo is an externally built artifact that the gallery can start and
//! stop but otherwise knows nothing about. This crate defines the
//! [`Demo`] capability, the [`DemoName`] key it is registered under, and the
//! [`Viewport`] it is started with.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod demo;
pub mod error;
pub mod name;

pub use demo::{Demo, Viewport};
pub use error::{DemoError, DemoResult};
pub use name::{DemoName, NAME_MARKER};
