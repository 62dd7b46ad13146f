use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use client_core::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::theme::{PHONE_HEIGHT, PHONE_WIDTH};
use crate::ui::DesktopGuiApp;

#[derive(Parser, Debug)]
#[command(about = "Phone-style mock chat window")]
struct Args {
    /// Overrides the responder webhook from settings.
    #[arg(long)]
    webhook_url: Option<String>,
    /// Settings file to load instead of ./mock_chat.toml.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings =
        load_settings(args.config.as_deref()).context("failed to load chat settings")?;
    if let Some(webhook_url) = args.webhook_url {
        settings = settings
            .with_webhook_url(webhook_url)
            .context("invalid --webhook-url")?;
    }
    tracing::info!(webhook_url = %settings.webhook_url, "starting phone chat window");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.webhook_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(&settings.window_title)
            .with_inner_size([PHONE_WIDTH + 220.0, PHONE_HEIGHT + 140.0])
            .with_min_inner_size([PHONE_WIDTH + 40.0, PHONE_HEIGHT + 120.0]),
        ..Default::default()
    };
    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::bootstrap(cmd_tx, ui_rx)))),
    )
    .map_err(|err| anyhow::anyhow!("eframe exited with error: {err}"))
}
