//! MeteoViz Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{
    AnalysisCharts, ChartPlotter, DailySeries, DistributionCharts, RainCharts,
    StaticChartRenderer, TemperatureCharts, COMBINED_COLOR,
};
use crate::config::AppConfig;
use crate::data::MeteoDataset;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction, DatasetSummary};
use crate::stats::{
    daily_averages, StationSelector, StatsCalculator, FEBRUARY, PRECIPITATION_ACRONYM,
    TEMPERATURE_ACRONYM,
};
use anyhow::Context;
use egui::SidePanel;
use rayon::prelude::*;
use std::path::Path;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Synthetic days drawn for the projected year.
const SYNTHETIC_DAYS: usize = 28;

/// Histogram edges for the temperature distributions.
const TEMP_HIST_EDGES: (i32, i32) = (8, 21);

/// Pixel size of exported chart images.
const EXPORT_WIDTH: u32 = 1200;
const EXPORT_HEIGHT: u32 = 800;

/// Dataset loading result from the background thread
enum LoadResult {
    Progress(String),
    Complete(Box<MeteoDataset>),
    Error(String),
}

/// Analysis result from the background thread
enum CalcResult {
    Progress(f32, String),
    Complete(Box<AnalysisCharts>),
    Error(String),
}

/// Main application window.
pub struct MeteoVizApp {
    dataset: Option<Arc<MeteoDataset>>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async dataset loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,

    // Async analysis
    calc_rx: Option<Receiver<CalcResult>>,
    is_calculating: bool,
}

impl MeteoVizApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self {
            dataset: None,
            control_panel: ControlPanel::new(AppConfig::load_or_default()),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
            calc_rx: None,
            is_calculating: false,
        };
        // The dataset lives at fixed paths; load it right away.
        app.start_load();
        app
    }

    /// Load the three CSV exports on a background thread.
    fn start_load(&mut self) {
        if self.is_loading {
            return;
        }

        self.chart_viewer.clear();
        self.dataset = None;
        self.control_panel.run_enabled = false;
        self.control_panel.set_progress(0.0, "Loading CSV files...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        let config = self.control_panel.config.clone();
        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV files...".to_string()));
            match MeteoDataset::load(&config) {
                Ok(dataset) => {
                    let _ = tx.send(LoadResult::Complete(Box::new(dataset)));
                }
                Err(err) => {
                    log::error!("dataset load failed: {err}");
                    let _ = tx.send(LoadResult::Error(err.to_string()));
                }
            }
        });
    }

    /// Check for dataset loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete(dataset) => {
                        self.control_panel.update_summary(DatasetSummary {
                            station_count: dataset.stations.len(),
                            detail_count: dataset.details.len(),
                            variables: dataset
                                .metadata
                                .iter()
                                .map(|m| (m.acronym.clone(), m.description.clone()))
                                .collect(),
                        });
                        self.control_panel.set_progress(
                            0.0,
                            &format!(
                                "Loaded {} stations, {} detail rows",
                                dataset.stations.len(),
                                dataset.details.len()
                            ),
                        );
                        self.dataset = Some(Arc::new(*dataset));
                        self.is_loading = false;
                        should_keep_receiver = false;

                        // Run the analysis as soon as the data is in.
                        self.start_calculation();
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Start the analysis in a background thread
    fn start_calculation(&mut self) {
        let Some(dataset) = self.dataset.clone() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };

        let (tx, rx) = channel();
        self.calc_rx = Some(rx);
        self.is_calculating = true;
        self.control_panel.set_progress(5.0, "Aggregating data...");

        let config = self.control_panel.config.clone();
        thread::spawn(move || {
            match Self::build_charts(&tx, &dataset, &config) {
                Ok(charts) => {
                    let _ = tx.send(CalcResult::Complete(Box::new(charts)));
                }
                Err(error) => {
                    log::error!("analysis failed: {error}");
                    let _ = tx.send(CalcResult::Error(error));
                }
            }
        });
    }

    /// Build the three analyses (called from the background thread)
    fn build_charts(
        tx: &Sender<CalcResult>,
        dataset: &MeteoDataset,
        config: &AppConfig,
    ) -> Result<AnalysisCharts, String> {
        let records = &dataset.details;

        let _ = tx.send(CalcResult::Progress(
            15.0,
            "Aggregating temperatures...".to_string(),
        ));

        let combined = DailySeries {
            label: "All stations".to_string(),
            color: COMBINED_COLOR,
            days: daily_averages(records, TEMPERATURE_ACRONYM, &StationSelector::All, FEBRUARY)
                .map_err(|e| e.to_string())?,
        };

        // The per-station aggregations are independent scans.
        let per_station: Vec<DailySeries> = config
            .focus_stations
            .par_iter()
            .enumerate()
            .map(|(idx, code)| {
                daily_averages(
                    records,
                    TEMPERATURE_ACRONYM,
                    &StationSelector::station(code.clone()),
                    FEBRUARY,
                )
                .map(|days| DailySeries {
                    label: format!("Station {code}"),
                    color: ChartPlotter::station_color(idx),
                    days,
                })
                .map_err(|e| e.to_string())
            })
            .collect::<Result<_, _>>()?;

        let _ = tx.send(CalcResult::Progress(
            45.0,
            "Fitting the temperature distribution...".to_string(),
        ));

        let observed: Vec<f64> = combined.days.iter().map(|d| d.value).collect();
        let stats = StatsCalculator::descriptive(&observed).map_err(|e| e.to_string())?;
        let projected =
            StatsCalculator::project_normal_sample(&stats, SYNTHETIC_DAYS, &mut rand::thread_rng())
                .map_err(|e| e.to_string())?;

        let (lo, hi) = TEMP_HIST_EDGES;
        let distribution = DistributionCharts {
            stats,
            observed_hist: StatsCalculator::histogram(&observed, lo, hi),
            projected_hist: StatsCalculator::histogram(&projected, lo, hi),
        };

        let _ = tx.send(CalcResult::Progress(
            75.0,
            "Aggregating precipitation...".to_string(),
        ));

        let daily = daily_averages(
            records,
            PRECIPITATION_ACRONYM,
            &StationSelector::All,
            FEBRUARY,
        )
        .map_err(|e| e.to_string())?;
        let (rainy_days, dry_days) = StatsCalculator::rain_counts(&daily);

        Ok(AnalysisCharts {
            temperature: TemperatureCharts {
                combined,
                per_station,
            },
            distribution,
            rain: RainCharts {
                daily,
                rainy_days,
                dry_days,
            },
        })
    }

    /// Check for analysis results
    fn check_calculation_results(&mut self) {
        // Take the receiver temporarily to avoid borrow issues
        let rx = self.calc_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    CalcResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    CalcResult::Complete(charts) => {
                        self.chart_viewer.set_charts(*charts);
                        self.control_panel
                            .set_progress(100.0, "Complete! 3 analyses ready");
                        self.is_calculating = false;
                        should_keep_receiver = false;
                    }
                    CalcResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_calculating = false;
                        should_keep_receiver = false;
                    }
                }
            }

            // Put receiver back if still needed
            if should_keep_receiver {
                self.calc_rx = Some(rx);
            }
        }
    }

    /// Re-point the data directory and reload.
    fn handle_browse_data_dir(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(dir) = rfd::FileDialog::new().pick_folder() {
            self.control_panel.config.data_dir = dir;
            self.start_load();
        }
    }

    /// Render the charts to PNG files in a user-chosen directory.
    fn handle_export_charts(&mut self) {
        let Some(charts) = self.chart_viewer.charts.clone() else {
            self.control_panel.set_progress(0.0, "No charts to export");
            return;
        };

        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.set_progress(10.0, "Rendering charts...");

        match Self::export_charts(&charts, &dir) {
            Ok(count) => {
                self.control_panel.set_progress(
                    100.0,
                    &format!("Complete! Exported {count} charts to {}", dir.display()),
                );
                // Reveal the exported files.
                if let Err(err) = open::that(&dir) {
                    log::warn!("could not open {}: {err}", dir.display());
                }
            }
            Err(err) => {
                self.control_panel
                    .set_progress(0.0, &format!("Error: {err:#}"));
            }
        }
    }

    fn export_charts(charts: &AnalysisCharts, dir: &Path) -> anyhow::Result<usize> {
        let images = StaticChartRenderer::render_all(charts, EXPORT_WIDTH, EXPORT_HEIGHT)?;
        let count = images.len();
        for (name, bytes) in images {
            std::fs::write(dir.join(&name), bytes)
                .with_context(|| format!("writing {name}"))?;
        }
        Ok(count)
    }
}

impl eframe::App for MeteoVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for background results
        self.check_load_results();
        self.check_calculation_results();

        // Request repaint while loading or calculating
        if self.is_loading || self.is_calculating {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseDataDir => self.handle_browse_data_dir(),
                        ControlPanelAction::Reload => self.start_load(),
                        ControlPanelAction::RunAnalysis => {
                            if !self.is_calculating {
                                self.start_calculation();
                            }
                        }
                        ControlPanelAction::ExportCharts => {
                            self.handle_export_charts();
                        }
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
