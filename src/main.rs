//! MeteoViz - MeteoCat CSV Data Analysis & Interactive Chart Viewer
//!
//! A Rust application for exploring MeteoCat station exports and displaying
//! interactive charts of February temperature and precipitation.

mod charts;
mod config;
mod data;
mod gui;
mod stats;

use eframe::egui;
use gui::MeteoVizApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("MeteoViz"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "MeteoViz",
        options,
        Box::new(|cc| Ok(Box::new(MeteoVizApp::new(cc)))),
    )
}
