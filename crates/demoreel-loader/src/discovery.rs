//! Catalog discovery from standard locations.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::loader::{catalog_dir, load_catalog};
use crate::manifest::CatalogManifest;

/// Standard catalog manifest file name.
pub const MANIFEST_FILE_NAME: &str = "Demos.toml";

/// Catalog directory in a workspace.
#[must_use]
pub fn workspace_catalog_dir(workspace_root: &Path) -> PathBuf {
    workspace_root.join(".demoreel")
}

/// Discover and load catalogs.
///
/// Looks in:
/// 1. `{workspace}/.demoreel/` (when `workspace_root` is given)
/// 2. each of `extra_paths`: a manifest file, or a directory holding a
///    `Demos.toml` directly or in any immediate subdirectory
///
/// Catalogs that fail to load are logged and skipped so one broken manifest
/// does not hide the rest. Returns `(manifest, catalog_dir)` pairs in
/// discovery order.
pub async fn discover_catalogs(
    workspace_root: Option<&Path>,
    extra_paths: &[PathBuf],
) -> Vec<(CatalogManifest, PathBuf)> {
    let mut candidates = Vec::new();

    if let Some(root) = workspace_root {
        let dir = workspace_catalog_dir(root);
        if dir.is_dir() {
            info!(path = %dir.display(), "Discovering catalogs from workspace");
            candidates.extend(manifests_in_dir(&dir));
        }
    }

    for path in extra_paths {
        if path.is_file() {
            candidates.push(path.clone());
        } else if path.is_dir() {
            info!(path = %path.display(), "Discovering catalogs from custom path");
            candidates.extend(manifests_in_dir(path));
        } else {
            warn!(path = %path.display(), "Catalog path does not exist");
        }
    }

    let mut catalogs = Vec::new();
    for path in candidates {
        match load_catalog(&path).await {
            Ok(manifest) => catalogs.push((manifest, catalog_dir(&path))),
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to load catalog"),
        }
    }

    info!(count = catalogs.len(), "Discovered catalogs");
    catalogs
}

/// Manifest paths directly in `dir` or one level below it.
fn manifests_in_dir(dir: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    let direct = dir.join(MANIFEST_FILE_NAME);
    if direct.is_file() {
        found.push(direct);
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Failed to read catalog directory");
            return found;
        },
    };

    let mut nested: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path().join(MANIFEST_FILE_NAME))
        .filter(|p| p.is_file())
        .collect();
    nested.sort();
    for path in &nested {
        debug!(path = %path.display(), "Found nested catalog");
    }
    found.extend(nested);
    found
}
