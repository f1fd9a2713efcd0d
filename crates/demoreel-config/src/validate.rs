//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Largest accepted viewport edge in pixels.
const MAX_VIEWPORT_EDGE: u32 = 16_384;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_selector(config)?;
    validate_viewport(config)?;
    validate_logging(config)?;
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.to_owned(),
        message: message.into(),
    }
}

fn validate_selector(config: &Config) -> ConfigResult<()> {
    let s = &config.selector;

    if s.default.is_empty() {
        return Err(invalid("selector.default", "default demo name must not be empty"));
    }
    if s.default.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(invalid(
            "selector.default",
            format!("'{}' contains whitespace or control characters", s.default),
        ));
    }

    if !matches!(s.start.as_str(), "default" | "last") {
        return Err(invalid(
            "selector.start",
            format!("unsupported start '{}'; expected one of: default, last", s.start),
        ));
    }

    if !matches!(
        s.ordering.as_str(),
        "registration" | "lexical" | "chapter-section"
    ) {
        return Err(invalid(
            "selector.ordering",
            format!(
                "unsupported ordering '{}'; expected one of: registration, lexical, chapter-section",
                s.ordering
            ),
        ));
    }

    if s.ordering == "chapter-section" && s.prefix.is_empty() {
        return Err(invalid(
            "selector.prefix",
            "prefix must not be empty for chapter-section ordering",
        ));
    }

    Ok(())
}

fn validate_viewport(config: &Config) -> ConfigResult<()> {
    let v = config.viewport;
    for (field, edge) in [("viewport.width", v.width), ("viewport.height", v.height)] {
        if edge == 0 || edge > MAX_VIEWPORT_EDGE {
            return Err(invalid(
                field,
                format!("{edge} is out of range; must be between 1 and {MAX_VIEWPORT_EDGE}"),
            ));
        }
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if l.level.trim().is_empty() {
        return Err(invalid("logging.level", "log level must not be empty"));
    }

    if !matches!(l.format.as_str(), "pretty" | "compact" | "json" | "full") {
        return Err(invalid(
            "logging.format",
            format!(
                "unsupported log format '{}'; expected one of: pretty, compact, json, full",
                l.format
            ),
        ));
    }

    match l.target.as_str() {
        "stderr" | "stdout" => {},
        "file" => {
            if l.directory.as_ref().is_none_or(|d| d.as_os_str().is_empty()) {
                return Err(invalid(
                    "logging.directory",
                    "a log directory is required when logging.target is \"file\"",
                ));
            }
        },
        other => {
            return Err(invalid(
                "logging.target",
                format!("unsupported log target '{other}'; expected one of: stderr, stdout, file"),
            ));
        },
    }

    if !matches!(l.rotation.as_str(), "daily" | "hourly" | "never") {
        return Err(invalid(
            "logging.rotation",
            format!(
                "unsupported log rotation '{}'; expected one of: daily, hourly, never",
                l.rotation
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: ConfigResult<()>) -> String {
        match result {
            Err(ConfigError::ValidationError { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_default_name_rules() {
        let mut config = Config::default();
        config.selector.default = String::new();
        assert_eq!(field_of(validate(&config)), "selector.default");

        config.selector.default = "two words".to_owned();
        assert_eq!(field_of(validate(&config)), "selector.default");
    }

    #[test]
    fn test_start_and_ordering_rules() {
        let mut config = Config::default();
        config.selector.start = "first".to_owned();
        assert_eq!(field_of(validate(&config)), "selector.start");

        let mut config = Config::default();
        config.selector.ordering = "shuffled".to_owned();
        assert_eq!(field_of(validate(&config)), "selector.ordering");
    }

    #[test]
    fn test_empty_prefix_only_matters_for_sections() {
        let mut config = Config::default();
        config.selector.prefix = String::new();
        assert_eq!(field_of(validate(&config)), "selector.prefix");

        config.selector.ordering = "lexical".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_viewport_bounds() {
        let mut config = Config::default();
        config.viewport.width = 0;
        assert_eq!(field_of(validate(&config)), "viewport.width");

        let mut config = Config::default();
        config.viewport.height = MAX_VIEWPORT_EDGE.saturating_add(1);
        assert_eq!(field_of(validate(&config)), "viewport.height");
    }

    #[test]
    fn test_logging_rules() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.format");

        let mut config = Config::default();
        config.logging.level = "  ".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.level");
    }

    #[test]
    fn test_file_target_needs_directory() {
        let mut config = Config::default();
        config.logging.target = "file".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.directory");

        config.logging.directory = Some("/tmp/demoreel-logs".into());
        assert!(validate(&config).is_ok());

        config.logging.rotation = "weekly".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.rotation");
    }

    #[test]
    fn test_unknown_target_rejected() {
        let mut config = Config::default();
        config.logging.target = "syslog".to_owned();
        assert_eq!(field_of(validate(&config)), "logging.target");
    }
}
