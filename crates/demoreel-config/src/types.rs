//! Configuration types.
//!
//! Every struct implements [`Default`] with the same values as the embedded
//! `defaults.toml`, so a bare `[section]` header produces a working
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which demos are listed and which one starts.
    pub selector: SelectorSection,
    /// Surface size passed to demos.
    pub viewport: ViewportSection,
    /// Where catalogs are found.
    pub catalog: CatalogSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// SelectorSection
// ---------------------------------------------------------------------------

/// Selector behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSection {
    /// Sentinel demo listed first.
    pub default: String,
    /// Initial demo: `"default"` (the sentinel) or `"last"` (last in order).
    pub start: String,
    /// Option ordering: `"registration"`, `"lexical"`, or
    /// `"chapter-section"`.
    pub ordering: String,
    /// Name prefix recognised by `"chapter-section"` ordering.
    pub prefix: String,
}

impl Default for SelectorSection {
    fn default() -> Self {
        Self {
            default: "_default".to_owned(),
            start: "default".to_owned(),
            ordering: "chapter-section".to_owned(),
            prefix: "_c".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// ViewportSection
// ---------------------------------------------------------------------------

/// Surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSection {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ViewportSection {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogSection
// ---------------------------------------------------------------------------

/// Catalog locations searched in addition to `{workspace}/.demoreel/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Manifest files or directories containing `Demos.toml`.
    pub paths: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Where logs go: `"stderr"`, `"stdout"`, or `"file"`.
    pub target: String,
    /// Log directory, required when `target` is `"file"`.
    pub directory: Option<PathBuf>,
    /// File rotation: `"daily"`, `"hourly"`, or `"never"`.
    pub rotation: String,
    /// Per-crate tracing directives (e.g. `["demoreel_loader=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            target: "stderr".to_owned(),
            directory: None,
            rotation: "daily".to_owned(),
            directives: Vec::new(),
        }
    }
}
