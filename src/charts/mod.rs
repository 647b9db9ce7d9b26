//! Charts module - interactive plotting and static export

mod plotter;
mod renderer;

pub use plotter::{
    AnalysisCharts, ChartPlotter, DailySeries, DistributionCharts, RainCharts,
    TemperatureCharts, COMBINED_COLOR, DRY_COLOR, OBSERVED_HIST_COLOR,
    PRECIPITATION_BAR_COLOR, PROJECTED_HIST_COLOR, RAINY_COLOR, STATION_PALETTE,
};
pub use renderer::{RenderError, StaticChartRenderer};
