//! Wine Review Narrative
//!
//! A GUI application stepping through scatter plots of wine scores and prices.

use anyhow::Context as _;
use eframe::egui;
use std::sync::{Arc, Mutex};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

use wine_narrative::app::{App, AppWrapper};
use wine_narrative::config::NarrativeConfig;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = NarrativeConfig::load().context("loading configuration")?;
    log::info!("Reading reviews from {}", config.dataset_path.display());

    let rt = Runtime::new().context("starting tokio runtime")?;
    rt.block_on(async {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([config.window_width, config.window_height])
                .with_min_inner_size([640.0, 480.0])
                .with_title("Is it worth splurging?"),
            ..Default::default()
        };

        eframe::run_native(
            "Wine Narrative",
            options,
            Box::new(|cc| {
                cc.egui_ctx.set_fonts(egui::FontDefinitions::default());

                let app: Arc<Mutex<App>> = Arc::new(Mutex::new(App::new(config)));
                Ok(Box::new(AppWrapper { app }) as Box<dyn eframe::App>)
            }),
        )
        .map_err(|e| anyhow::anyhow!("running application: {}", e))
    })
}
