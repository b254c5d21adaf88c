// src/main.rs
use anyhow::{Context, Result};
use eframe::egui;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use silver::app::SilverApp;
use silver::config::Settings;

fn main() -> Result<()> {
    let (settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("Invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Some(e) = config_error {
        warn!("Falling back to default settings: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_title("SILVER - RustSec Analyzer"),
        ..Default::default()
    };

    eframe::run_native(
        "SILVER",
        options,
        Box::new(move |cc| Box::new(SilverApp::new(cc, settings))),
    ).map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))
}
