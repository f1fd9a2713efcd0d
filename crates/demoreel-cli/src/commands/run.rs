//! `demoreel run`: interactive demo gallery.

use std::path::Path;

use anyhow::{Context, Result};
use demoreel_config::Config;
use demoreel_selector::{DemoSelector, SelectorError, SelectorHandle, Transition, spawn};
use dialoguer::{Select, theme::ColorfulTheme};
use tracing::{info, warn};

use crate::theme::Theme;
use crate::{catalog, config_bridge};

pub(crate) async fn run_gallery(
    cfg: &Config,
    workspace_root: Option<&Path>,
    catalog_path: Option<&Path>,
    demo: Option<&str>,
) -> Result<()> {
    let registry = catalog::registry(cfg, workspace_root, catalog_path).await?;
    let settings = config_bridge::to_selector_settings(cfg, demo)?;
    let selector =
        DemoSelector::initialize(registry, settings).context("failed to start the gallery")?;
    if let Some(active) = selector.active() {
        println!("{}", Theme::success(&format!("Running {}", active.label())));
    }

    let (handle, task) = spawn(selector);
    let result = prompt_loop(&handle).await;

    if let Err(e) = handle.shutdown().await {
        warn!(error = %e, "Failed to stop active demo");
    }
    drop(handle);
    if let Err(e) = task.await {
        warn!(error = %e, "Selector task ended abnormally");
    }
    info!("Gallery closed");
    result
}

/// Prompt until the user quits. Selection failures are reported and the
/// prompt continues with whatever state the selector ended up in.
async fn prompt_loop(handle: &SelectorHandle) -> Result<()> {
    loop {
        let snapshot = handle.snapshot().await?;
        let labels: Vec<String> = snapshot.options.iter().map(|o| o.label.clone()).collect();
        let current = snapshot
            .active()
            .and_then(|active| snapshot.options.iter().position(|o| &o.value == active))
            .unwrap_or(0);

        let choice = tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Demo (Esc or q to quit)")
                .items(&labels)
                .default(current)
                .interact_opt()
        })
        .await
        .context("prompt task failed")?
        .context("failed to read selection")?;

        let Some(option) = choice.and_then(|index| snapshot.options.get(index)) else {
            return Ok(());
        };

        match handle.select(option.value.clone()).await {
            Ok(Transition::Switched { to, .. }) => {
                println!("{}", Theme::success(&format!("Running {}", to.label())));
            },
            Ok(Transition::Unchanged) => {
                println!("{}", Theme::dimmed(&format!("{} is already running", option.label)));
            },
            Err(SelectorError::ServiceClosed) => {
                return Err(SelectorError::ServiceClosed.into());
            },
            Err(e) => {
                warn!(demo = %option.value, error = %e, "Selection failed");
                println!("{}", Theme::warning(&e.to_string()));
            },
        }
    }
}
