//! Catalog manifest types.
//!
//! A catalog manifest (`Demos.toml`) lists the demos of one externally built
//! collection: the name each demo is registered under, the command that
//! starts it, and optional aliases that bind extra names to existing demos.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use demoreel_core::DemoName;

use crate::error::{LoaderError, LoaderResult};

/// A catalog manifest loaded from `Demos.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogManifest {
    /// Catalog metadata.
    #[serde(default)]
    pub catalog: CatalogDef,
    /// The demos in this catalog.
    #[serde(default, rename = "demo")]
    pub demos: Vec<DemoDef>,
    /// Extra names bound to demos of this catalog (`alias = "target"`).
    #[serde(default)]
    pub aliases: BTreeMap<DemoName, DemoName>,
}

/// Catalog metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDef {
    /// Human-readable catalog name.
    pub name: Option<String>,
    /// Optional description.
    pub description: Option<String>,
}

/// One demo entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoDef {
    /// Registry name.
    pub name: DemoName,
    /// Program to start. Relative paths containing a separator are resolved
    /// against the catalog directory.
    pub command: String,
    /// Program arguments.
    #[serde(default)]
    pub args: Vec<String>,
    /// Extra environment variables.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    /// Working directory, relative to the catalog directory. Defaults to the
    /// catalog directory itself.
    pub cwd: Option<PathBuf>,
    /// Optional description.
    pub description: Option<String>,
}

impl CatalogManifest {
    /// Check internal consistency.
    ///
    /// Demo names must be unique, aliases must not shadow demos, and every
    /// alias must point at a demo declared in this manifest.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::InvalidManifest`] naming the first problem.
    pub fn validate(&self, path: &Path) -> LoaderResult<()> {
        let invalid = |message: String| LoaderError::InvalidManifest {
            path: path.to_path_buf(),
            message,
        };

        let mut seen = HashSet::new();
        for demo in &self.demos {
            if !seen.insert(&demo.name) {
                return Err(invalid(format!("duplicate demo name {}", demo.name)));
            }
            if demo.command.trim().is_empty() {
                return Err(invalid(format!("demo {} has an empty command", demo.name)));
            }
        }

        for (alias, target) in &self.aliases {
            if seen.contains(alias) {
                return Err(invalid(format!("alias {alias} shadows a demo")));
            }
            if !seen.contains(target) {
                return Err(invalid(format!(
                    "alias {alias} points at unknown demo {target}"
                )));
            }
        }
        Ok(())
    }

    /// Number of names this catalog registers (aliases included).
    #[must_use]
    pub fn name_count(&self) -> usize {
        self.demos.len().saturating_add(self.aliases.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> CatalogManifest {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let manifest = parse(&demoreel_test::sample_catalog("sb7"));
        assert_eq!(manifest.catalog.name.as_deref(), Some("superbible"));
        assert_eq!(manifest.demos.len(), 4);
        assert_eq!(manifest.demos[0].name.as_str(), "_default");
        assert_eq!(manifest.demos[0].args, ["default"]);
        assert_eq!(manifest.aliases.len(), 1);
        assert_eq!(manifest.name_count(), 5);
        manifest.validate(Path::new("Demos.toml")).unwrap();
    }

    #[test]
    fn test_parse_defaults() {
        let manifest = parse(
            r#"
            [[demo]]
            name = "_default"
            command = "./bin/clear"
        "#,
        );
        assert!(manifest.catalog.name.is_none());
        assert!(manifest.demos[0].args.is_empty());
        assert!(manifest.demos[0].env.is_empty());
        assert!(manifest.demos[0].cwd.is_none());
    }

    #[test]
    fn test_invalid_name_rejected_at_parse() {
        let result = toml::from_str::<CatalogManifest>(
            r#"
            [[demo]]
            name = ""
            command = "x"
        "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_duplicate_demo() {
        let manifest = parse(
            r#"
            [[demo]]
            name = "_a"
            command = "x"
            [[demo]]
            name = "_a"
            command = "y"
        "#,
        );
        let err = manifest.validate(Path::new("Demos.toml")).unwrap_err();
        assert!(err.to_string().contains("duplicate demo name _a"));
    }

    #[test]
    fn test_validate_alias_target() {
        let manifest = parse(
            r#"
            [[demo]]
            name = "_a"
            command = "x"
            [aliases]
            _default = "_missing"
        "#,
        );
        let err = manifest.validate(Path::new("Demos.toml")).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidManifest { .. }));
    }

    #[test]
    fn test_validate_alias_shadow() {
        let manifest = parse(
            r#"
            [[demo]]
            name = "_a"
            command = "x"
            [aliases]
            _a = "_a"
        "#,
        );
        assert!(manifest.validate(Path::new("Demos.toml")).is_err());
    }

    #[test]
    fn test_validate_empty_command() {
        let manifest = parse(
            r#"
            [[demo]]
            name = "_a"
            command = "  "
        "#,
        );
        assert!(manifest.validate(Path::new("Demos.toml")).is_err());
    }
}
