//! Statistics module - aggregation and descriptive statistics

mod aggregator;
mod calculator;

pub use aggregator::{
    daily_averages, AggregateError, DayAverage, StationSelector, FEBRUARY,
    PRECIPITATION_ACRONYM, TEMPERATURE_ACRONYM,
};
pub use calculator::{Descriptive, StatsCalculator, StatsError};
