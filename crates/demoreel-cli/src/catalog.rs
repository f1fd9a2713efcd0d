//! Registry loading for the CLI commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use demoreel_config::Config;
use demoreel_loader::{MANIFEST_FILE_NAME, build_registry, discover_catalogs, load_registry};
use demoreel_selector::DemoRegistry;
use tracing::info;

/// Build the demo registry.
///
/// An explicit `catalog` (a manifest, or a directory holding `Demos.toml`)
/// is loaded strictly. Otherwise catalogs are discovered in the workspace
/// and in `catalog.paths`, skipping broken ones.
pub(crate) async fn registry(
    cfg: &Config,
    workspace_root: Option<&Path>,
    catalog: Option<&Path>,
) -> Result<DemoRegistry> {
    if let Some(path) = catalog {
        let manifest = manifest_path(path);
        let registry = load_registry(std::slice::from_ref(&manifest))
            .await
            .with_context(|| format!("failed to load catalog {}", manifest.display()))?;
        info!(path = %manifest.display(), demos = registry.len(), "Loaded catalog");
        return Ok(registry);
    }

    let catalogs = discover_catalogs(workspace_root, &cfg.catalog.paths).await;
    if catalogs.is_empty() {
        bail!(
            "no demo catalogs found; add .demoreel/{MANIFEST_FILE_NAME}, set catalog.paths, or pass --catalog"
        );
    }
    let registry = build_registry(&catalogs).context("failed to build demo registry")?;
    info!(
        catalogs = catalogs.len(),
        demos = registry.len(),
        "Loaded discovered catalogs"
    );
    Ok(registry)
}

fn manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(MANIFEST_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use demoreel_test::{TempCatalog, sample_catalog};

    #[tokio::test]
    async fn test_explicit_catalog_dir() {
        let catalog = TempCatalog::new(&sample_catalog("true"));
        let registry = registry(&Config::default(), None, Some(catalog.dir()))
            .await
            .unwrap();
        assert!(registry.len() >= 4);
    }

    #[tokio::test]
    async fn test_missing_explicit_catalog_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(
            registry(&Config::default(), None, Some(&missing))
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn test_nothing_discovered_is_error() {
        let ws = tempfile::tempdir().unwrap();
        let err = registry(&Config::default(), Some(ws.path()), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("no demo catalogs found"));
    }
}
