use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use tracing::info;

use lift_tracker::{logging, ApiClient, Cli, LiftTrackerApp, Settings};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli).context("failed to load settings")?;
    logging::init(&settings.log_filter);

    info!(
        environment = %settings.environment,
        server = %settings.server_origin,
        api_base = %settings.api_base(),
        "starting lift-tracker"
    );

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    let client = ApiClient::new(&settings).context("failed to build HTTP client")?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(settings.window_size),
        ..Default::default()
    };

    eframe::run_native(
        "Lift Tracker",
        options,
        Box::new(move |cc| Ok(Box::new(LiftTrackerApp::new(cc, client, handle)))),
    )
    .map_err(|e| anyhow!("window error: {e}"))?;

    info!("lift-tracker closed");
    Ok(())
}
