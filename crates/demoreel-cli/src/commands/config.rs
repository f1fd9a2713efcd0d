//! `demoreel config`: show the resolved configuration.

use anyhow::Result;
use demoreel_config::ResolvedConfig;

use crate::formatter::OutputFormat;
use crate::theme::Theme;

pub(crate) fn show_config(resolved: &ResolvedConfig, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", resolved.to_json()?),
        OutputFormat::Pretty => {
            if resolved.loaded_files.is_empty() {
                println!("{}", Theme::info("No config files found; using defaults"));
            } else {
                println!("{}", Theme::header("Loaded config files"));
                for file in &resolved.loaded_files {
                    println!("  {file}");
                }
            }
            println!("{}", Theme::separator());
            print!("{}", resolved.to_toml()?);
        },
    }
    Ok(())
}
