//! Environment variable fallbacks.
//!
//! Env vars are a **fallback**, not an override: they only fill fields that
//! no config file set.

use std::collections::HashMap;

use tracing::debug;

use crate::merge::{ConfigLayer, FieldSources};

/// Mapping from environment variable name to config field path.
struct EnvMapping {
    var_name: &'static str,
    field_path: &'static str,
    kind: FieldKind,
}

#[derive(Clone, Copy)]
enum FieldKind {
    String,
    Integer,
    /// Platform path list (`:`-separated on Unix).
    PathList,
}

const ENV_MAPPINGS: &[EnvMapping] = &[
    EnvMapping {
        var_name: "DEMOREEL_DEFAULT_DEMO",
        field_path: "selector.default",
        kind: FieldKind::String,
    },
    EnvMapping {
        var_name: "DEMOREEL_START",
        field_path: "selector.start",
        kind: FieldKind::String,
    },
    EnvMapping {
        var_name: "DEMOREEL_VIEWPORT_WIDTH",
        field_path: "viewport.width",
        kind: FieldKind::Integer,
    },
    EnvMapping {
        var_name: "DEMOREEL_VIEWPORT_HEIGHT",
        field_path: "viewport.height",
        kind: FieldKind::Integer,
    },
    EnvMapping {
        var_name: "DEMOREEL_CATALOG",
        field_path: "catalog.paths",
        kind: FieldKind::PathList,
    },
    EnvMapping {
        var_name: "DEMOREEL_LOG_LEVEL",
        field_path: "logging.level",
        kind: FieldKind::String,
    },
    EnvMapping {
        var_name: "DEMOREEL_LOG_FORMAT",
        field_path: "logging.format",
        kind: FieldKind::String,
    },
];

/// Snapshot the `DEMOREEL_*` environment.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars()
        .filter(|(k, _)| k.starts_with("DEMOREEL_"))
        .collect()
}

/// Apply environment variable fallbacks to fields that were **not** set by
/// any config file layer.
///
/// Returns the number of env vars applied.
pub fn apply_env_fallbacks<S: ::std::hash::BuildHasher>(
    merged: &mut toml::Value,
    sources: &mut FieldSources,
    env_vars: &HashMap<String, String, S>,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let set_by_file = matches!(
            sources.get(mapping.field_path),
            Some(ConfigLayer::User | ConfigLayer::Workspace)
        );
        if set_by_file {
            continue;
        }

        if let Some(val) = env_vars.get(mapping.var_name) {
            debug!(
                var = mapping.var_name,
                field = mapping.field_path,
                "applying env var fallback"
            );
            set_field(merged, mapping.field_path, coerce(mapping.kind, val));
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        }
    }

    count
}

fn coerce(kind: FieldKind, val: &str) -> toml::Value {
    match kind {
        FieldKind::String => toml::Value::String(val.to_owned()),
        // Unparseable numbers stay strings and fail deserialization with a
        // clear error naming the field.
        FieldKind::Integer => val
            .trim()
            .parse::<i64>()
            .map_or_else(|_| toml::Value::String(val.to_owned()), toml::Value::Integer),
        FieldKind::PathList => toml::Value::Array(
            std::env::split_paths(val)
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| toml::Value::String(p.display().to_string()))
                .collect(),
        ),
    }
}

/// Set the dotted `path` in `root`, creating intermediate tables.
fn set_field(root: &mut toml::Value, path: &str, val: toml::Value) {
    let (parents, leaf) = path.rsplit_once('.').unwrap_or(("", path));

    let mut current = root;
    for segment in parents.split('.').filter(|s| !s.is_empty()) {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment.to_owned())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }
    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), val);
    }
}
