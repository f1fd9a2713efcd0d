//! Demo registry and selector.
//!
//! The selector presents the registered demos as an ordered list of options
//! and keeps at most one of them running. Switching stops the active demo
//! before the newly selected one is started.
//!
//! # Example
//!
//! ```rust,ignore
//! use demoreel_selector::{DemoRegistry, DemoSelector, SelectorSettings};
//!
//! let mut registry = DemoRegistry::new();
//! registry.register(DemoName::new("_default")?, Box::new(clear_screen))?;
//! registry.register(DemoName::new("_ch3_1_vertexattr")?, Box::new(vertex_attr))?;
//!
//! let settings = SelectorSettings::new(DemoName::new("_default")?);
//! let mut selector = DemoSelector::initialize(registry, settings)?;
//! selector.select(&DemoName::new("_ch3_1_vertexattr")?)?;
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod ordering;
pub mod registry;
pub mod selector;
pub mod service;

pub use error::{SelectorError, SelectorResult};
pub use ordering::{DEFAULT_SECTION_PREFIX, OrderingPolicy, SectionKey};
pub use registry::DemoRegistry;
pub use selector::{
    DemoSelector, SelectOption, SelectorSettings, SelectorState, StartPolicy, Transition,
    option_list,
};
pub use service::{SelectorHandle, SelectorSnapshot, spawn};
