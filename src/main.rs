//! Automobile Sales Statistics Dashboard
//!
//! Loads the historical automobile sales dataset once at startup and
//! visualizes it as yearly or recession period statistics, four charts
//! at a time.

mod charts;
mod config;
mod data;
mod gui;
mod report;

use eframe::egui;
use gui::DashboardApp;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> eframe::Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let config = config::AppConfig::load();
    tracing::info!(url = %config.data_url, "starting dashboard");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1480.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Automobile Sales Statistics Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Automobile Sales Statistics Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
}
