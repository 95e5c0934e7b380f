mod app;
mod color;
mod config;
mod data;
mod engine;
mod i18n;
mod share;
mod state;
mod ui;

use anyhow::Context;
use app::BacViewerApp;
use clap::Parser;
use config::{Args, ViewerConfig};
use eframe::egui;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = ViewerConfig::try_from(Args::parse())?;
    log::info!(
        "data {}, queries {}, highlight {:?}",
        config.data_path.display(),
        config.query.range,
        config.policy
    );
    if config.query.corrections.is_empty() {
        log::debug!("no average corrections configured");
    }
    for (year, average) in config.query.corrections.iter() {
        log::warn!("average for {year} will be shown as {average:.2}%");
    }

    let title = config.language.translations().page_title;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(BacViewerApp::new(config, &cc.egui_ctx)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running the viewer window")
}
