//! Chart Viewer Widget
//! Central scrollable panel showing one card per analysis.

use crate::charts::{
    AnalysisCharts, ChartPlotter, DistributionCharts, RainCharts, TemperatureCharts,
    DRY_COLOR, OBSERVED_HIST_COLOR, PRECIPITATION_BAR_COLOR, PROJECTED_HIST_COLOR, RAINY_COLOR,
};
use egui::{Color32, RichText, ScrollArea, Stroke};

const CARD_SPACING: f32 = 15.0;
const LINE_CHART_HEIGHT: f32 = 260.0;
const SUBPLOT_HEIGHT: f32 = 130.0;
const HIST_HEIGHT: f32 = 280.0;
const PIE_DIAMETER: f32 = 260.0;

const TEMPERATURE_ACCENT: Color32 = Color32::from_rgb(52, 152, 219);
const DISTRIBUTION_ACCENT: Color32 = Color32::from_rgb(40, 167, 69);
const RAIN_ACCENT: Color32 = Color32::from_rgb(0, 150, 199);

/// Scrollable display area for the three analysis cards.
#[derive(Default)]
pub struct ChartViewer {
    pub charts: Option<AnalysisCharts>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all charts
    pub fn clear(&mut self) {
        self.charts = None;
    }

    pub fn set_charts(&mut self, charts: AnalysisCharts) {
        self.charts = Some(charts);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(charts) = self.charts.clone() else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                Self::draw_temperature_card(ui, &charts.temperature);
                ui.add_space(CARD_SPACING);
                Self::draw_distribution_card(ui, &charts.distribution);
                ui.add_space(CARD_SPACING);
                Self::draw_rain_card(ui, &charts.rain);
                ui.add_space(CARD_SPACING);
            });
    }

    fn card(
        ui: &mut egui::Ui,
        accent: Color32,
        title: &str,
        body: impl FnOnce(&mut egui::Ui),
    ) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(Stroke::new(2.0, accent))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(title).size(18.0).strong().color(accent));
                ui.add_space(8.0);
                body(ui);
            });
    }

    fn legend_entry(ui: &mut egui::Ui, color: Color32, text: &str) {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 3.0, color);
        ui.label(RichText::new(text).size(13.0));
        ui.add_space(10.0);
    }

    fn draw_temperature_card(ui: &mut egui::Ui, data: &TemperatureCharts) {
        Self::card(
            ui,
            TEMPERATURE_ACCENT,
            "Mean temperature in February 2022",
            |ui| {
                ui.horizontal(|ui| {
                    Self::legend_entry(ui, data.combined.color, &data.combined.label);
                    for series in &data.per_station {
                        Self::legend_entry(ui, series.color, &series.label);
                    }
                });
                ui.add_space(6.0);

                ChartPlotter::draw_daily_lines(
                    ui,
                    "temp_combined",
                    std::slice::from_ref(&data.combined),
                    "Temperature (°C)",
                    LINE_CHART_HEIGHT,
                );

                ui.add_space(10.0);
                ui.label(RichText::new("By station").size(14.0).strong());
                ChartPlotter::draw_daily_lines(
                    ui,
                    "temp_stations",
                    &data.per_station,
                    "Temperature (°C)",
                    LINE_CHART_HEIGHT,
                );

                ui.add_space(10.0);
                for series in &data.per_station {
                    ui.label(RichText::new(&series.label).size(13.0).strong());
                    ChartPlotter::draw_daily_lines(
                        ui,
                        &format!("temp_subplot_{}", series.label),
                        std::slice::from_ref(series),
                        "°C",
                        SUBPLOT_HEIGHT,
                    );
                    ui.add_space(6.0);
                }
            },
        );
    }

    fn draw_distribution_card(ui: &mut egui::Ui, data: &DistributionCharts) {
        Self::card(
            ui,
            DISTRIBUTION_ACCENT,
            "Temperature distribution, February 2022 vs. projected 2023",
            |ui| {
                ui.label(
                    RichText::new(format!(
                        "Observed mean {:.2} °C, σ {:.2} °C over {} days; the projection \
                         draws {} synthetic days from the fitted normal distribution.",
                        data.stats.mean,
                        data.stats.std_dev,
                        data.stats.count,
                        data.projected_hist.iter().map(|&(_, n)| n).sum::<usize>(),
                    ))
                    .size(12.0),
                );
                ui.add_space(8.0);

                ui.columns(2, |columns| {
                    columns[0].label(RichText::new("February 2022").size(14.0).strong());
                    ChartPlotter::draw_histogram(
                        &mut columns[0],
                        "hist_observed",
                        &data.observed_hist,
                        OBSERVED_HIST_COLOR,
                        "Temperature (°C)",
                        HIST_HEIGHT,
                    );

                    columns[1].label(
                        RichText::new("February 2023 (projected)").size(14.0).strong(),
                    );
                    ChartPlotter::draw_histogram(
                        &mut columns[1],
                        "hist_projected",
                        &data.projected_hist,
                        PROJECTED_HIST_COLOR,
                        "Temperature (°C)",
                        HIST_HEIGHT,
                    );
                });
            },
        );
    }

    fn draw_rain_card(ui: &mut egui::Ui, data: &RainCharts) {
        Self::card(ui, RAIN_ACCENT, "Rain in February 2022", |ui| {
            ui.columns(2, |columns| {
                let left = &mut columns[0];
                left.label(RichText::new("Proportion of rainy days").size(14.0).strong());
                left.add_space(6.0);
                ChartPlotter::draw_pie(
                    left,
                    &[
                        ("Rainy".to_string(), data.rainy_days as f64, RAINY_COLOR),
                        ("Dry".to_string(), data.dry_days as f64, DRY_COLOR),
                    ],
                    PIE_DIAMETER,
                );
                left.add_space(6.0);
                left.horizontal(|ui| {
                    Self::legend_entry(ui, RAINY_COLOR, &format!("Rainy ({})", data.rainy_days));
                    Self::legend_entry(ui, DRY_COLOR, &format!("Dry ({})", data.dry_days));
                });

                let right = &mut columns[1];
                right.label(RichText::new("Precipitation by day").size(14.0).strong());
                ChartPlotter::draw_daily_bars_horizontal(
                    right,
                    "ppt_bars",
                    &data.daily,
                    PRECIPITATION_BAR_COLOR,
                    HIST_HEIGHT + 40.0,
                );
            });
        });
    }
}
