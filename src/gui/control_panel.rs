//! Control Panel Widget
//! Left side panel with data source controls and analysis actions.

use crate::charts::ChartPlotter;
use crate::config::AppConfig;
use egui::{Color32, RichText, ScrollArea};

/// Read-only dataset facts shown after a successful load.
pub struct DatasetSummary {
    pub station_count: usize,
    pub detail_count: usize,
    /// Known variables from the metadata table: (acronym, description).
    pub variables: Vec<(String, String)>,
}

/// Left side control panel with the data source and processing controls.
pub struct ControlPanel {
    pub config: AppConfig,
    pub summary: Option<DatasetSummary>,
    pub progress: f32,
    pub status: String,
    pub run_enabled: bool,
}

impl ControlPanel {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            summary: None,
            progress: 0.0,
            status: "Ready".to_string(),
            run_enabled: false,
        }
    }

    /// Update the dataset summary after a load completes.
    pub fn update_summary(&mut self, summary: DatasetSummary) {
        self.run_enabled = summary.detail_count > 0;
        self.summary = Some(summary);
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🌦 MeteoViz")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("MeteoCat station explorer")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(self.config.data_dir.display().to_string())
                            .size(12.0)
                            .color(Color32::WHITE),
                    );

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseDataDir;
                        }
                    });
                });

                ui.add_space(4.0);
                for file in [
                    &self.config.stations_file,
                    &self.config.details_file,
                    &self.config.metadata_file,
                ] {
                    ui.label(RichText::new(file).size(11.0).color(Color32::GRAY));
                }
            });

        ui.add_space(5.0);
        if ui.small_button("⟲ Reload").clicked() {
            action = ControlPanelAction::Reload;
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Dataset Section =====
        ui.label(RichText::new("📊 Dataset").size(14.0).strong());
        ui.add_space(5.0);

        match &self.summary {
            Some(summary) => {
                ui.label(
                    RichText::new(format!(
                        "{} stations, {} detail rows",
                        summary.station_count, summary.detail_count
                    ))
                    .size(12.0),
                );

                ui.add_space(8.0);
                ui.label(RichText::new("Focus stations").size(12.0).strong());
                ui.horizontal_wrapped(|ui| {
                    for (idx, code) in self.config.focus_stations.iter().enumerate() {
                        let (rect, _) = ui.allocate_exact_size(
                            egui::vec2(12.0, 12.0),
                            egui::Sense::hover(),
                        );
                        ui.painter()
                            .rect_filled(rect, 2.0, ChartPlotter::station_color(idx));
                        ui.label(RichText::new(code).size(12.0));
                        ui.add_space(8.0);
                    }
                });

                if !summary.variables.is_empty() {
                    ui.add_space(8.0);
                    ui.label(RichText::new("Variables").size(12.0).strong());
                    ScrollArea::vertical()
                        .max_height(120.0)
                        .show(ui, |ui| {
                            for (acronym, description) in &summary.variables {
                                ui.label(
                                    RichText::new(format!("{acronym} — {description}"))
                                        .size(11.0)
                                        .color(Color32::GRAY),
                                );
                            }
                        });
                }
            }
            None => {
                ui.label(RichText::new("No data loaded").size(12.0).color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.run_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Run Analysis").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::RunAnalysis;
                }
            });

            ui.add_space(8.0);

            // Export button (enabled once an analysis has completed)
            let export_enabled = self.progress >= 100.0 && self.status.contains("Complete");
            ui.add_enabled_ui(export_enabled, |ui| {
                let export_button =
                    egui::Button::new(RichText::new("🖼 Export Charts").size(14.0))
                        .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportCharts;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("⏳ Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by the control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseDataDir,
    Reload,
    RunAnalysis,
    ExportCharts,
}
