//! Typed views over the raw MeteoCat tables.

/// One row of the station list export.
#[derive(Debug, Clone)]
pub struct StationRecord {
    pub code: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// One measurement row of the per-station detail export.
///
/// The value stays textual here; it is parsed to `f64` at aggregation time
/// so a malformed reading surfaces as an aggregation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    /// Reading date, "YYYY-MM-DD".
    pub date: String,
    pub station: String,
    pub acronym: String,
    pub value: String,
}

impl DetailRecord {
    pub fn new(
        date: impl Into<String>,
        station: impl Into<String>,
        acronym: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            station: station.into(),
            acronym: acronym.into(),
            value: value.into(),
        }
    }
}

/// One row of the variable metadata export.
#[derive(Debug, Clone)]
pub struct MetadataRecord {
    pub acronym: String,
    pub description: String,
}
