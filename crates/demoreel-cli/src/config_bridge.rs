//! Bridge from `demoreel_config::Config` to selector and logging types.

use anyhow::{Context, Result};
use demoreel_config::Config;
use demoreel_core::{DemoName, Viewport};
use demoreel_selector::{OrderingPolicy, SelectorSettings, StartPolicy};
use demoreel_telemetry::{FileRotation, LogConfig, LogFormat, LogTarget};

/// Convert config to [`LogConfig`].
pub fn to_log_config(cfg: &Config) -> LogConfig {
    let logging = &cfg.logging;
    let format = logging
        .format
        .parse::<LogFormat>()
        .unwrap_or(LogFormat::Compact);

    let log_config = LogConfig::new(&logging.level)
        .with_format(format)
        .with_directives(&logging.directives);

    match (logging.target.as_str(), &logging.directory) {
        ("stdout", _) => log_config.with_target(LogTarget::Stdout),
        ("file", Some(dir)) => {
            let rotation = logging
                .rotation
                .parse::<FileRotation>()
                .unwrap_or_default();
            log_config.with_file_logging(dir, rotation)
        },
        _ => log_config,
    }
}

/// Convert config to [`OrderingPolicy`].
pub fn to_ordering(cfg: &Config) -> OrderingPolicy {
    match cfg.selector.ordering.as_str() {
        "registration" => OrderingPolicy::Registration,
        "lexical" => OrderingPolicy::Lexical,
        _ => OrderingPolicy::ChapterSection {
            prefix: cfg.selector.prefix.clone(),
        },
    }
}

/// Convert config to [`SelectorSettings`].
///
/// `start_override` (from `run --demo`) takes precedence over
/// `selector.start`.
///
/// # Errors
///
/// Returns an error if the default or override name is not a valid demo name.
pub fn to_selector_settings(
    cfg: &Config,
    start_override: Option<&str>,
) -> Result<SelectorSettings> {
    let default_name = DemoName::new(&cfg.selector.default)
        .with_context(|| format!("invalid selector.default '{}'", cfg.selector.default))?;

    let start = match start_override {
        Some(raw) => StartPolicy::Named(
            DemoName::new(raw).with_context(|| format!("invalid demo name '{raw}'"))?,
        ),
        None if cfg.selector.start == "last" => StartPolicy::Last,
        None => StartPolicy::Default,
    };

    Ok(SelectorSettings::new(default_name)
        .with_ordering(to_ordering(cfg))
        .with_start(start)
        .with_viewport(Viewport::new(cfg.viewport.width, cfg.viewport.height)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_bridge() {
        let settings = to_selector_settings(&Config::default(), None).unwrap();
        assert_eq!(settings.default_name.as_str(), "_default");
        assert_eq!(settings.start, StartPolicy::Default);
        assert_eq!(settings.ordering, OrderingPolicy::default());
        assert_eq!(settings.viewport, Viewport::new(1200, 900));
    }

    #[test]
    fn test_start_last_and_override() {
        let mut cfg = Config::default();
        cfg.selector.start = "last".to_owned();
        assert_eq!(
            to_selector_settings(&cfg, None).unwrap().start,
            StartPolicy::Last
        );

        let settings = to_selector_settings(&cfg, Some("_ch3_1_vertexattr")).unwrap();
        assert_eq!(
            settings.start,
            StartPolicy::Named(DemoName::new("_ch3_1_vertexattr").unwrap())
        );
    }

    #[test]
    fn test_invalid_override_rejected() {
        assert!(to_selector_settings(&Config::default(), Some("two words")).is_err());
    }

    #[test]
    fn test_ordering_bridge() {
        let mut cfg = Config::default();
        cfg.selector.ordering = "lexical".to_owned();
        assert_eq!(to_ordering(&cfg), OrderingPolicy::Lexical);

        cfg.selector.ordering = "chapter-section".to_owned();
        cfg.selector.prefix = "_ch".to_owned();
        assert_eq!(
            to_ordering(&cfg),
            OrderingPolicy::ChapterSection {
                prefix: "_ch".to_owned()
            }
        );
    }

    #[test]
    fn test_log_config_bridge() {
        let mut cfg = Config::default();
        cfg.logging.level = "warn".to_owned();
        cfg.logging.format = "json".to_owned();
        cfg.logging.directives = vec!["demoreel_loader=debug".to_owned()];

        let log = to_log_config(&cfg);
        assert_eq!(log.level, "warn");
        assert_eq!(log.format, LogFormat::Json);
        assert_eq!(log.directives, ["demoreel_loader=debug"]);
    }

    #[test]
    fn test_file_target_bridge() {
        let mut cfg = Config::default();
        cfg.logging.target = "file".to_owned();
        cfg.logging.directory = Some("/var/log/demoreel".into());
        cfg.logging.rotation = "never".to_owned();

        let log = to_log_config(&cfg);
        assert_eq!(log.target, LogTarget::File("/var/log/demoreel".into()));
        assert_eq!(log.file.rotation, FileRotation::Never);
        assert!(!log.ansi);

        cfg.logging.target = "stdout".to_owned();
        assert_eq!(to_log_config(&cfg).target, LogTarget::Stdout);
    }
}
