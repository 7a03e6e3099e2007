//! Sales Dashboard - E-Commerce order exploration
//!
//! Loads the configured CSV export and shows filters and charts over it.

use anyhow::Result;
use eframe::egui;
use sales_dashboard::config::{DashboardConfig, CONFIG_FILE};
use sales_dashboard::gui::{Dashboard, DashboardApp};
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let dashboard = Dashboard::startup(&config);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([900.0, 600.0])
            .with_title(config.title.as_str()),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        &config.title,
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to start the dashboard window: {e}"))
}
