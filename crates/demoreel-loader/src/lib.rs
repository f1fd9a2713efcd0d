//! Catalog loading for demoreel.
//!
//! A catalog is a `Demos.toml` manifest naming externally built demos and the
//! command that starts each of them. This crate reads catalogs, discovers
//! them in well-known locations, and turns them into a
//! [`DemoRegistry`](demoreel_selector::DemoRegistry) of process-backed demos.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod discovery;
pub mod error;
pub mod loader;
pub mod manifest;
pub mod process;

pub use discovery::{MANIFEST_FILE_NAME, discover_catalogs, workspace_catalog_dir};
pub use error::{LoaderError, LoaderResult};
pub use loader::{build_registry, load_catalog, load_registry, register_catalog};
pub use manifest::{CatalogDef, CatalogManifest, DemoDef};
pub use process::{HEIGHT_ENV, ProcessDemo, WIDTH_ENV};
