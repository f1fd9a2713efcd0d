//! Loader error types.

use std::path::PathBuf;

use demoreel_selector::SelectorError;
use thiserror::Error;

/// Errors that can occur while loading catalogs.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The manifest could not be read.
    #[error("Failed to read catalog at {path}: {source}")]
    ReadError {
        /// Path to the manifest.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The manifest is not valid TOML or does not match the schema.
    #[error("Failed to parse catalog at {path}: {message}")]
    ParseError {
        /// Path to the manifest.
        path: PathBuf,
        /// The parse error message.
        message: String,
    },

    /// The manifest parsed but is inconsistent.
    #[error("Invalid catalog at {path}: {message}")]
    InvalidManifest {
        /// Path to the manifest.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// The manifest exceeds the size limit.
    #[error("Catalog at {path} is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge {
        /// Path to the manifest.
        path: PathBuf,
        /// Actual size in bytes.
        size: u64,
        /// Maximum size in bytes.
        limit: u64,
    },

    /// Registering a demo failed (usually a duplicate name across catalogs).
    #[error(transparent)]
    Registry(#[from] SelectorError),
}

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;
