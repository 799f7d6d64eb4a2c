//! Chart Table - Chart Data to Downloadable Table
//!
//! Paste CSV data or point at a web page, get typed tables, a moving average
//! trend summary and CSV downloads.

use anyhow::Context;
use chart_table::gui::ChartTableApp;
use chart_table::{AppConfig, Pipeline};
use eframe::egui;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();

    let config = AppConfig::load().context("failed to load configuration")?;
    info!(
        column = %config.analysis.column,
        window = config.analysis.window,
        timeout_secs = config.fetch.timeout_secs,
        "configuration loaded"
    );
    let pipeline = Pipeline::new(config).context("failed to build pipeline")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Chart Table"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Chart Table",
        options,
        Box::new(move |cc| Ok(Box::new(ChartTableApp::new(cc, pipeline)))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the application: {}", e))
}
