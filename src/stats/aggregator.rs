//! Daily Average Aggregator
//! Groups detail rows by day of month and averages the matching values.

use crate::data::DetailRecord;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use thiserror::Error;

/// The month analyzed throughout the app.
pub const FEBRUARY: u32 = 2;

/// Acronym of the mean-temperature variable.
pub const TEMPERATURE_ACRONYM: &str = "TM";

/// Acronym of the accumulated-precipitation variable.
pub const PRECIPITATION_ACRONYM: &str = "PPT";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("detail row {row}: invalid date {date:?}")]
    InvalidDate { row: usize, date: String },
    #[error("detail row {row}: invalid numeric value {value:?}")]
    InvalidValue { row: usize, value: String },
}

/// Station filter for an aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StationSelector {
    /// Combine readings from every station.
    All,
    /// A single station code, matched exactly.
    Station(String),
}

impl StationSelector {
    pub fn station(code: impl Into<String>) -> Self {
        Self::Station(code.into())
    }

    fn matches(&self, code: &str) -> bool {
        match self {
            Self::All => true,
            Self::Station(wanted) => wanted == code,
        }
    }
}

/// Mean value for one day of the month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayAverage {
    pub day: u32,
    pub value: f64,
}

/// Average the matching detail rows per day of month.
///
/// A row matches when its date falls in `month`, its acronym equals
/// `acronym` ignoring case, and its station passes `selector`. The result
/// carries one entry per day that had at least one matching row, sorted
/// ascending by day; days with no data are absent, not zero-filled.
///
/// Every scanned row must carry a well-formed date and numeric value; a
/// malformed row is an error even when the filters would reject it.
pub fn daily_averages(
    records: &[DetailRecord],
    acronym: &str,
    selector: &StationSelector,
    month: u32,
) -> Result<Vec<DayAverage>, AggregateError> {
    let mut values_by_day: BTreeMap<u32, Vec<f64>> = BTreeMap::new();

    for (row, record) in records.iter().enumerate() {
        let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|_| {
            AggregateError::InvalidDate {
                row,
                date: record.date.clone(),
            }
        })?;
        let value: f64 =
            record
                .value
                .trim()
                .parse()
                .map_err(|_| AggregateError::InvalidValue {
                    row,
                    value: record.value.clone(),
                })?;

        if date.month() == month
            && record.acronym.eq_ignore_ascii_case(acronym)
            && selector.matches(&record.station)
        {
            values_by_day.entry(date.day()).or_default().push(value);
        }
    }

    Ok(values_by_day
        .into_iter()
        .map(|(day, values)| DayAverage {
            day,
            value: values.iter().sum::<f64>() / values.len() as f64,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, station: &str, acronym: &str, value: &str) -> DetailRecord {
        DetailRecord::new(date, station, acronym, value)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn averages_matching_rows_per_day() {
        let records = vec![
            row("2022-02-01", "X4", "TM", "10.0"),
            row("2022-02-01", "X4", "TM", "12.0"),
        ];

        let result =
            daily_averages(&records, "TM", &StationSelector::station("X4"), FEBRUARY).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].day, 1);
        assert_close(result[0].value, 11.0);
    }

    #[test]
    fn all_stations_is_the_union_mean() {
        // Not a mean of per-station means: (10 + 20 + 20) / 3, not (10 + 20) / 2.
        let records = vec![
            row("2022-02-01", "D5", "TM", "10.0"),
            row("2022-02-01", "X4", "TM", "20.0"),
            row("2022-02-01", "X4", "TM", "20.0"),
        ];

        let result = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap();

        assert_eq!(result.len(), 1);
        assert_close(result[0].value, 50.0 / 3.0);
    }

    #[test]
    fn one_row_per_day_keeps_the_value() {
        let records: Vec<DetailRecord> = (1..=28)
            .map(|day| row(&format!("2022-02-{day:02}"), "X8", "TM", "7.5"))
            .collect();

        let result = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap();

        assert_eq!(result.len(), 28);
        for (i, avg) in result.iter().enumerate() {
            assert_eq!(avg.day, i as u32 + 1);
            assert_close(avg.value, 7.5);
        }
    }

    #[test]
    fn no_matching_rows_is_empty() {
        let records = vec![row("2022-02-01", "X4", "TM", "10.0")];

        let result =
            daily_averages(&records, "PPT", &StationSelector::All, FEBRUARY).unwrap();
        assert!(result.is_empty());

        let result =
            daily_averages(&records, "TM", &StationSelector::station("D5"), FEBRUARY).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn acronym_matches_case_insensitively() {
        let records = vec![row("2022-02-03", "X4", "tm", "4.0")];

        let result = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].day, 3);
    }

    #[test]
    fn other_months_are_filtered_out() {
        let records = vec![
            row("2022-01-15", "X4", "TM", "3.0"),
            row("2022-02-15", "X4", "TM", "9.0"),
            row("2022-03-15", "X4", "TM", "15.0"),
        ];

        let result = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].day, 15);
        assert_close(result[0].value, 9.0);
    }

    #[test]
    fn output_is_sorted_by_day() {
        let records = vec![
            row("2022-02-20", "X4", "TM", "12.0"),
            row("2022-02-03", "X4", "TM", "8.0"),
            row("2022-02-11", "X4", "TM", "10.0"),
        ];

        let result = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap();
        let days: Vec<u32> = result.iter().map(|a| a.day).collect();
        assert_eq!(days, [3, 11, 20]);
    }

    #[test]
    fn malformed_value_is_an_error() {
        let records = vec![
            row("2022-02-01", "X4", "TM", "10.0"),
            row("2022-02-02", "X4", "TM", "n/a"),
        ];

        let err = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap_err();
        assert!(matches!(
            err,
            AggregateError::InvalidValue { row: 1, .. }
        ));
    }

    #[test]
    fn malformed_date_is_an_error() {
        let records = vec![row("02/01/2022", "X4", "TM", "10.0")];

        let err = daily_averages(&records, "TM", &StationSelector::All, FEBRUARY).unwrap_err();
        assert!(matches!(err, AggregateError::InvalidDate { row: 0, .. }));
    }
}
