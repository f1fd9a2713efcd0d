//! `demoreel list`: print the option list without starting anything.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use demoreel_config::Config;
use demoreel_selector::{SelectOption, option_list};

use crate::formatter::OutputFormat;
use crate::theme::Theme;
use crate::{catalog, config_bridge};

pub(crate) async fn list_demos(
    cfg: &Config,
    workspace_root: Option<&Path>,
    catalog_path: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let registry = catalog::registry(cfg, workspace_root, catalog_path).await?;
    let settings = config_bridge::to_selector_settings(cfg, None)?;
    let options = option_list(&registry, &settings).context("cannot build option list")?;

    println!("{}", render_options(&options, format)?);
    Ok(())
}

/// Render the option list in `format`, keeping the list's order.
fn render_options(options: &[SelectOption], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(options)?),
        OutputFormat::Pretty => {
            let mut out = String::new();
            writeln!(out, "{}", Theme::header("Demos"))?;
            writeln!(out, "  {:<32} LABEL", "NAME")?;
            writeln!(out, "{}", Theme::separator())?;
            for option in options {
                writeln!(out, "  {:<32} {}", option.value.as_str(), option.label)?;
            }
            write!(
                out,
                "\n{}",
                Theme::dimmed(&format!("{} demo(s)", options.len()))
            )?;
            Ok(out)
        },
    }
}
