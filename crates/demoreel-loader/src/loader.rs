//! Reading catalogs and building the demo registry.
//!
//! Reads are asynchronous so a frontend can keep its event loop alive while
//! large catalogs are fetched. Building the registry is synchronous.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use demoreel_selector::DemoRegistry;

use crate::error::{LoaderError, LoaderResult};
use crate::manifest::CatalogManifest;
use crate::process::ProcessDemo;

/// Maximum allowed catalog file size (1 MiB).
const MAX_CATALOG_FILE_SIZE: u64 = 1_048_576;

/// Read, parse, and validate one catalog manifest.
///
/// # Errors
///
/// Returns a [`LoaderError`] if the file cannot be read, is too large, is not
/// a valid manifest, or is internally inconsistent.
pub async fn load_catalog(path: &Path) -> LoaderResult<CatalogManifest> {
    let read_error = |source| LoaderError::ReadError {
        path: path.to_path_buf(),
        source,
    };

    let size = tokio::fs::metadata(path).await.map_err(read_error)?.len();
    if size > MAX_CATALOG_FILE_SIZE {
        return Err(LoaderError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = tokio::fs::read_to_string(path).await.map_err(read_error)?;

    let manifest: CatalogManifest =
        toml::from_str(&content).map_err(|e| LoaderError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    manifest.validate(path)?;

    debug!(
        path = %path.display(),
        catalog = manifest.catalog.name.as_deref().unwrap_or("<unnamed>"),
        demos = manifest.demos.len(),
        "Loaded catalog"
    );
    Ok(manifest)
}

/// Register every demo and alias of `manifest` into `registry`.
///
/// Process demos run with `catalog_dir` as their base directory. Returns the
/// number of names registered.
///
/// # Errors
///
/// Returns [`LoaderError::Registry`] if a name is already registered.
pub fn register_catalog(
    registry: &mut DemoRegistry,
    manifest: &CatalogManifest,
    catalog_dir: &Path,
) -> LoaderResult<usize> {
    for def in &manifest.demos {
        registry.register(
            def.name.clone(),
            Box::new(ProcessDemo::from_def(def, catalog_dir)),
        )?;
    }
    for (alias, target) in &manifest.aliases {
        registry.alias(alias.clone(), target)?;
    }
    Ok(manifest.name_count())
}

/// Build one registry from already loaded catalogs, in order.
///
/// # Errors
///
/// Returns [`LoaderError::Registry`] if two catalogs declare the same name.
pub fn build_registry(catalogs: &[(CatalogManifest, PathBuf)]) -> LoaderResult<DemoRegistry> {
    let mut registry = DemoRegistry::new();
    for (manifest, dir) in catalogs {
        let count = register_catalog(&mut registry, manifest, dir)?;
        debug!(dir = %dir.display(), names = count, "Registered catalog");
    }
    info!(
        catalogs = catalogs.len(),
        names = registry.len(),
        "Demo registry ready"
    );
    Ok(registry)
}

/// Load the catalogs at `paths` and build one registry from them.
///
/// Unlike discovery, any unreadable or malformed catalog is an error.
///
/// # Errors
///
/// Returns the first load or registration failure.
pub async fn load_registry(paths: &[PathBuf]) -> LoaderResult<DemoRegistry> {
    let mut catalogs = Vec::with_capacity(paths.len());
    for path in paths {
        let manifest = load_catalog(path).await?;
        catalogs.push((manifest, catalog_dir(path)));
    }
    build_registry(&catalogs)
}

/// Directory a manifest's relative paths are resolved against.
pub(crate) fn catalog_dir(manifest_path: &Path) -> PathBuf {
    manifest_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}
