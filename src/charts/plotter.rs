//! Chart Plotter Module
//! Creates interactive visualizations using egui_plot.

use crate::stats::{DayAverage, Descriptive};
use egui::{Color32, Stroke, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

/// Color of the combined all-stations series.
pub const COMBINED_COLOR: Color32 = Color32::from_rgb(45, 45, 45);

/// Colors for the focus stations, in configuration order.
pub const STATION_PALETTE: [Color32; 4] = [
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(233, 30, 99),  // Pink
];

pub const OBSERVED_HIST_COLOR: Color32 = Color32::from_rgb(144, 238, 144); // Light green
pub const PROJECTED_HIST_COLOR: Color32 = Color32::from_rgb(173, 216, 230); // Light blue
pub const RAINY_COLOR: Color32 = Color32::from_rgb(173, 216, 230); // Light blue
pub const DRY_COLOR: Color32 = Color32::from_rgb(211, 211, 211); // Light gray
pub const PRECIPITATION_BAR_COLOR: Color32 = Color32::from_rgb(144, 238, 144);

/// First and last day shown on the February day axis.
pub const FIRST_DAY: f64 = 1.0;
pub const LAST_DAY: f64 = 28.0;

/// One daily series: the combined selector or a single station.
#[derive(Clone)]
pub struct DailySeries {
    pub label: String,
    pub color: Color32,
    pub days: Vec<DayAverage>,
}

/// Chart data for the temperature view.
#[derive(Clone)]
pub struct TemperatureCharts {
    pub combined: DailySeries,
    pub per_station: Vec<DailySeries>,
}

/// Chart data for the distribution view.
#[derive(Clone)]
pub struct DistributionCharts {
    pub stats: Descriptive,
    pub observed_hist: Vec<(i32, usize)>,
    pub projected_hist: Vec<(i32, usize)>,
}

/// Chart data for the rain view.
#[derive(Clone)]
pub struct RainCharts {
    pub daily: Vec<DayAverage>,
    pub rainy_days: usize,
    pub dry_days: usize,
}

/// Bundle handed from the analysis worker to the viewer.
#[derive(Clone)]
pub struct AnalysisCharts {
    pub temperature: TemperatureCharts,
    pub distribution: DistributionCharts,
    pub rain: RainCharts,
}

/// Creates the interactive charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Color for the focus station at `index`.
    pub fn station_color(index: usize) -> Color32 {
        STATION_PALETTE[index % STATION_PALETTE.len()]
    }

    fn day_points(days: &[DayAverage]) -> Vec<[f64; 2]> {
        days.iter().map(|d| [d.day as f64, d.value]).collect()
    }

    /// Line chart of one or more daily series, day axis fixed to 1..=28.
    pub fn draw_daily_lines(
        ui: &mut egui::Ui,
        id: &str,
        series: &[DailySeries],
        y_label: &str,
        height: f32,
    ) {
        Plot::new(id.to_string())
            .height(height)
            .legend(Legend::default())
            .x_axis_label("Day")
            .y_axis_label(y_label)
            .include_x(FIRST_DAY - 0.5)
            .include_x(LAST_DAY + 0.5)
            .allow_scroll(false)
            .x_axis_formatter(|mark, _range| {
                let day = mark.value.round();
                if (FIRST_DAY..=LAST_DAY).contains(&day) && (mark.value - day).abs() < 1e-6 {
                    format!("{day:.0}")
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                for s in series {
                    let points = Self::day_points(&s.days);
                    plot_ui.line(
                        Line::new(PlotPoints::from_iter(points.iter().copied()))
                            .color(s.color)
                            .width(1.5)
                            .name(&s.label),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from_iter(points.iter().copied()))
                            .radius(3.0)
                            .color(s.color)
                            .name(&s.label),
                    );
                }
            });
    }

    /// Histogram as a unit-width bar chart over `(bin edge, count)` pairs.
    pub fn draw_histogram(
        ui: &mut egui::Ui,
        id: &str,
        bins: &[(i32, usize)],
        color: Color32,
        x_label: &str,
        height: f32,
    ) {
        let bars: Vec<Bar> = bins
            .iter()
            .map(|&(edge, count)| {
                Bar::new(edge as f64 + 0.5, count as f64)
                    .width(1.0)
                    .fill(color)
                    .stroke(Stroke::new(1.0, Color32::BLACK))
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .x_axis_label(x_label)
            .y_axis_label("Frequency (days)")
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    /// Horizontal bar chart of daily precipitation, day on the y axis.
    pub fn draw_daily_bars_horizontal(
        ui: &mut egui::Ui,
        id: &str,
        days: &[DayAverage],
        color: Color32,
        height: f32,
    ) {
        let bars: Vec<Bar> = days
            .iter()
            .map(|d| {
                Bar::new(d.day as f64, d.value)
                    .width(0.8)
                    .fill(color)
                    .stroke(Stroke::new(1.0, Color32::BLACK))
            })
            .collect();

        Plot::new(id.to_string())
            .height(height)
            .x_axis_label("Precipitation (mm)")
            .y_axis_label("Day")
            .include_y(FIRST_DAY - 0.5)
            .include_y(LAST_DAY + 0.5)
            .allow_scroll(false)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            });
    }

    /// Pie chart drawn with the painter; egui_plot has no pie primitive.
    /// Starts at twelve o'clock and sweeps counter-clockwise.
    pub fn draw_pie(ui: &mut egui::Ui, slices: &[(String, f64, Color32)], diameter: f32) {
        let (response, painter) =
            ui.allocate_painter(Vec2::splat(diameter), egui::Sense::hover());
        let center = response.rect.center();
        let radius = diameter * 0.5 - 4.0;

        let total: f64 = slices.iter().map(|(_, value, _)| value).sum();
        if total <= 0.0 {
            return;
        }

        let point_at = |angle: f64| {
            center + radius * Vec2::new(angle.cos() as f32, angle.sin() as f32)
        };

        let mut start = -std::f64::consts::FRAC_PI_2;
        for (label, value, color) in slices {
            let sweep = value / total * std::f64::consts::TAU;
            // Tessellate into 2-degree triangles; a slice over 180 degrees
            // is not a convex polygon.
            let steps = (sweep.to_degrees() / 2.0).ceil().max(1.0) as usize;
            for i in 0..steps {
                let a0 = start - sweep * i as f64 / steps as f64;
                let a1 = start - sweep * (i + 1) as f64 / steps as f64;
                painter.add(egui::Shape::convex_polygon(
                    vec![center, point_at(a0), point_at(a1)],
                    *color,
                    Stroke::NONE,
                ));
            }

            if *value > 0.0 {
                let mid = start - sweep / 2.0;
                let label_pos =
                    center + radius * 0.55 * Vec2::new(mid.cos() as f32, mid.sin() as f32);
                painter.text(
                    label_pos,
                    egui::Align2::CENTER_CENTER,
                    format!("{label}\n{:.1}%", value / total * 100.0),
                    egui::FontId::proportional(13.0),
                    Color32::BLACK,
                );
            }

            start -= sweep;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_points_map_day_and_value() {
        let days = [
            DayAverage { day: 1, value: 9.5 },
            DayAverage { day: 4, value: 11.0 },
        ];

        assert_eq!(
            ChartPlotter::day_points(&days),
            vec![[1.0, 9.5], [4.0, 11.0]]
        );
    }

    #[test]
    fn station_palette_wraps_around() {
        assert_eq!(ChartPlotter::station_color(0), STATION_PALETTE[0]);
        assert_eq!(
            ChartPlotter::station_color(STATION_PALETTE.len()),
            STATION_PALETTE[0]
        );
    }
}
