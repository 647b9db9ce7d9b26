//! Static Chart Renderer
//! Renders the analysis charts to PNG bytes with Plotters for export.

use crate::charts::{
    AnalysisCharts, DailySeries, DistributionCharts, RainCharts, TemperatureCharts, DRY_COLOR,
    OBSERVED_HIST_COLOR, PRECIPITATION_BAR_COLOR, PROJECTED_HIST_COLOR, RAINY_COLOR,
};
use egui::Color32;
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("chart rendering failed: {0}")]
    Draw(String),
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

fn draw_err(err: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(err.to_string())
}

fn to_rgb(color: Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

/// Renders chart images for export, one PNG per analysis.
pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render all three analyses into `(file name, PNG bytes)` pairs.
    pub fn render_all(
        charts: &AnalysisCharts,
        width: u32,
        height: u32,
    ) -> Result<Vec<(String, Vec<u8>)>, RenderError> {
        Ok(vec![
            (
                "february_temperature.png".to_string(),
                Self::render_temperature(&charts.temperature, width, height)?,
            ),
            (
                "february_temperature_distribution.png".to_string(),
                Self::render_distribution(&charts.distribution, width, height)?,
            ),
            (
                "february_rain.png".to_string(),
                Self::render_rain(&charts.rain, width, height)?,
            ),
        ])
    }

    fn render_temperature(
        data: &TemperatureCharts,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (top, bottom) = root.split_vertically((height / 2) as i32);
            let combined: Vec<&DailySeries> = vec![&data.combined];
            let stations: Vec<&DailySeries> = data.per_station.iter().collect();

            Self::draw_series_chart(&top, "Mean temperature in February 2022", &combined)?;
            Self::draw_series_chart(
                &bottom,
                "Mean temperature by station in February 2022",
                &stations,
            )?;

            root.present().map_err(draw_err)?;
        }
        Self::encode_png(buf, width, height)
    }

    fn render_distribution(
        data: &DistributionCharts,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, RenderError> {
        let max_count = data
            .observed_hist
            .iter()
            .chain(data.projected_hist.iter())
            .map(|&(_, count)| count)
            .max()
            .unwrap_or(0);

        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (left, right) = root.split_horizontally((width / 2) as i32);
            Self::draw_histogram_chart(
                &left,
                "Temperature distribution, February 2022",
                &data.observed_hist,
                to_rgb(OBSERVED_HIST_COLOR),
                max_count,
            )?;
            Self::draw_histogram_chart(
                &right,
                "Projected distribution, February 2023",
                &data.projected_hist,
                to_rgb(PROJECTED_HIST_COLOR),
                max_count,
            )?;

            root.present().map_err(draw_err)?;
        }
        Self::encode_png(buf, width, height)
    }

    fn render_rain(data: &RainCharts, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut buf = vec![0u8; (width * height * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let (left, right) = root.split_horizontally((width / 2) as i32);

            let pie_area = left
                .titled(
                    "Proportion of rainy days, February 2022",
                    ("sans-serif", 20).into_font(),
                )
                .map_err(draw_err)?;
            let dims = pie_area.dim_in_pixel();
            let center = (dims.0 as i32 / 2, dims.1 as i32 / 2);
            let radius = (dims.0.min(dims.1) as f64) * 0.35;
            let sizes = vec![data.rainy_days as f64, data.dry_days as f64];
            let colors = vec![to_rgb(RAINY_COLOR), to_rgb(DRY_COLOR)];
            let labels = vec!["Rainy".to_string(), "Dry".to_string()];

            if data.rainy_days + data.dry_days > 0 {
                let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
                pie.start_angle(90.0);
                pie.label_style(("sans-serif", 18).into_font());
                pie.percentages(("sans-serif", 14).into_font());
                pie_area.draw(&pie).map_err(draw_err)?;
            }

            Self::draw_precipitation_bars(&right, &data.daily)?;

            root.present().map_err(draw_err)?;
        }
        Self::encode_png(buf, width, height)
    }

    fn draw_series_chart(
        area: &DrawingArea<BitMapBackend, Shift>,
        title: &str,
        series: &[&DailySeries],
    ) -> Result<(), RenderError> {
        let (y_min, y_max) = Self::y_range(series);

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(0.5f64..28.5f64, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Day")
            .y_desc("Temperature (°C)")
            .draw()
            .map_err(draw_err)?;

        for s in series {
            let color = to_rgb(s.color);
            let points: Vec<(f64, f64)> =
                s.days.iter().map(|d| (d.day as f64, d.value)).collect();

            chart
                .draw_series(LineSeries::new(
                    points.iter().copied(),
                    color.stroke_width(2),
                ))
                .map_err(draw_err)?
                .label(s.label.clone())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2))
                });

            chart
                .draw_series(
                    points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
                )
                .map_err(draw_err)?;
        }

        chart
            .configure_series_labels()
            .border_style(BLACK)
            .background_style(WHITE.mix(0.8))
            .draw()
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_histogram_chart(
        area: &DrawingArea<BitMapBackend, Shift>,
        title: &str,
        bins: &[(i32, usize)],
        color: RGBColor,
        max_count: usize,
    ) -> Result<(), RenderError> {
        let Some(&(first_edge, _)) = bins.first() else {
            return Ok(());
        };
        let last_edge = bins[bins.len() - 1].0 + 1;

        let mut chart = ChartBuilder::on(area)
            .caption(title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(
                first_edge as f64..last_edge as f64,
                0u32..(max_count as u32 + 1),
            )
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Temperature (°C)")
            .y_desc("Frequency (days)")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(bins.iter().map(|&(edge, count)| {
                Rectangle::new(
                    [(edge as f64, 0u32), (edge as f64 + 1.0, count as u32)],
                    color.filled(),
                )
            }))
            .map_err(draw_err)?;
        chart
            .draw_series(bins.iter().map(|&(edge, count)| {
                Rectangle::new(
                    [(edge as f64, 0u32), (edge as f64 + 1.0, count as u32)],
                    BLACK.stroke_width(1),
                )
            }))
            .map_err(draw_err)?;

        Ok(())
    }

    fn draw_precipitation_bars(
        area: &DrawingArea<BitMapBackend, Shift>,
        daily: &[crate::stats::DayAverage],
    ) -> Result<(), RenderError> {
        let max_value = daily.iter().map(|d| d.value).fold(0.0, f64::max);
        let color = to_rgb(PRECIPITATION_BAR_COLOR);

        let mut chart = ChartBuilder::on(area)
            .caption("Precipitation by day, February 2022", ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(40)
            .build_cartesian_2d(0.0..(max_value * 1.1).max(1.0), 0.5f64..28.5f64)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_desc("Precipitation (mm)")
            .y_desc("Day")
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(daily.iter().map(|d| {
                Rectangle::new(
                    [
                        (0.0, d.day as f64 - 0.4),
                        (d.value, d.day as f64 + 0.4),
                    ],
                    color.filled(),
                )
            }))
            .map_err(draw_err)?;

        Ok(())
    }

    fn y_range(series: &[&DailySeries]) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for s in series {
            for d in &s.days {
                min = min.min(d.value);
                max = max.max(d.value);
            }
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        let pad = ((max - min) * 0.15).max(0.5);
        (min - pad, max + pad)
    }

    fn encode_png(buf: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let img = RgbImage::from_raw(width, height, buf)
            .ok_or_else(|| RenderError::Draw("pixel buffer does not match dimensions".into()))?;
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
        Ok(bytes)
    }
}
