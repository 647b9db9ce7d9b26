//! CSV Data Loader Module
//! Handles the MeteoCat CSV exports using Polars.

use crate::config::AppConfig;
use crate::data::records::{DetailRecord, MetadataRecord, StationRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

// Column layout of the detail export; the remaining columns are unused.
const DETAIL_DATE_COL: usize = 0;
const DETAIL_STATION_COL: usize = 2;
const DETAIL_ACRONYM_COL: usize = 3;
const DETAIL_VALUE_COL: usize = 4;

// Station list: code, name, coordinates.
const STATION_CODE_COL: usize = 0;
const STATION_NAME_COL: usize = 1;
const STATION_LAT_COL: usize = 2;
const STATION_LON_COL: usize = 3;

// Metadata: acronym, description.
const META_ACRONYM_COL: usize = 0;
const META_DESCRIPTION_COL: usize = 1;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("{}: expected at least {expected} columns, found {found}", path.display())]
    MissingColumns {
        path: PathBuf,
        expected: usize,
        found: usize,
    },
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV file into a DataFrame of string columns, header row
    /// consumed by the reader.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        // Schema inference disabled: every column stays textual and value
        // parsing is deferred to the aggregation pass.
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }
}

/// The three MeteoCat tables, loaded once at startup and shared immutably
/// for the rest of the process lifetime.
pub struct MeteoDataset {
    pub stations: Vec<StationRecord>,
    pub details: Vec<DetailRecord>,
    pub metadata: Vec<MetadataRecord>,
}

impl MeteoDataset {
    pub fn load(config: &AppConfig) -> Result<Self, LoaderError> {
        let stations = Self::extract_stations(&DataLoader::load_csv(&config.stations_path())?);
        let details = Self::extract_details(
            &DataLoader::load_csv(&config.details_path())?,
            &config.details_path(),
        )?;
        let metadata = Self::extract_metadata(&DataLoader::load_csv(&config.metadata_path())?);

        log::info!(
            "loaded {} stations, {} detail rows, {} metadata rows",
            stations.len(),
            details.len(),
            metadata.len()
        );

        Ok(Self {
            stations,
            details,
            metadata,
        })
    }

    /// Extract detail records by column position. Rows with null cells in
    /// the used columns are skipped.
    fn extract_details(df: &DataFrame, path: &Path) -> Result<Vec<DetailRecord>, LoaderError> {
        if df.width() <= DETAIL_VALUE_COL {
            return Err(LoaderError::MissingColumns {
                path: path.to_path_buf(),
                expected: DETAIL_VALUE_COL + 1,
                found: df.width(),
            });
        }

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let cells = (
                str_at(df, row, DETAIL_DATE_COL),
                str_at(df, row, DETAIL_STATION_COL),
                str_at(df, row, DETAIL_ACRONYM_COL),
                str_at(df, row, DETAIL_VALUE_COL),
            );
            if let (Some(date), Some(station), Some(acronym), Some(value)) = cells {
                records.push(DetailRecord::new(date, station, acronym, value));
            }
        }

        Ok(records)
    }

    fn extract_stations(df: &DataFrame) -> Vec<StationRecord> {
        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let code = str_at(df, row, STATION_CODE_COL);
            let name = str_at(df, row, STATION_NAME_COL);
            if let (Some(code), Some(name)) = (code, name) {
                records.push(StationRecord {
                    code,
                    name,
                    latitude: str_at(df, row, STATION_LAT_COL).and_then(|s| s.parse().ok()),
                    longitude: str_at(df, row, STATION_LON_COL).and_then(|s| s.parse().ok()),
                });
            }
        }
        records
    }

    fn extract_metadata(df: &DataFrame) -> Vec<MetadataRecord> {
        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let acronym = str_at(df, row, META_ACRONYM_COL);
            let description = str_at(df, row, META_DESCRIPTION_COL);
            if let (Some(acronym), Some(description)) = (acronym, description) {
                records.push(MetadataRecord {
                    acronym,
                    description,
                });
            }
        }
        records
    }

}

/// Cell accessor over an all-string DataFrame.
fn str_at(df: &DataFrame, row: usize, col: usize) -> Option<String> {
    let series = df.get_columns().get(col)?.as_materialized_series();
    let value = series.get(row).ok()?;
    if value.is_null() {
        None
    } else {
        Some(value.to_string().trim_matches('"').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use std::fs;
    use std::path::PathBuf;

    fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn fixture_config(dir: &Path) -> AppConfig {
        AppConfig {
            data_dir: dir.to_path_buf(),
            stations_file: "stations.csv".to_string(),
            details_file: "details.csv".to_string(),
            metadata_file: "metadata.csv".to_string(),
            ..AppConfig::default()
        }
    }

    const STATIONS_CSV: &str = "\
CODI_ESTACIO,NOM_ESTACIO,LATITUD,LONGITUD
D5,Barcelona - Observatori Fabra,41.41843,2.12388
X4,Barcelona - El Raval,41.38389,2.16775
";

    const DETAILS_CSV: &str = "\
DATA_LECTURA,DATA_EXTREM,CODI_ESTACIO,ACRONIM,VALOR_LECTURA,CODI_ESTAT
2022-02-01,,X4,TM,10.0,V
2022-02-01,,X4,PPT,0.0,V
2022-02-02,,D5,TM,9.4,V
";

    const METADATA_CSV: &str = "\
ACRONIM,NOM_VARIABLE,UNITAT
TM,Temperatura mitjana,°C
PPT,Precipitació acumulada,mm
";

    #[test]
    fn loads_header_stripped_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "details.csv", DETAILS_CSV);

        let df = DataLoader::load_csv(&path).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.width(), 6);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(DataLoader::load_csv(Path::new("does/not/exist.csv")).is_err());
    }

    #[test]
    fn extracts_records_by_column_position() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "stations.csv", STATIONS_CSV);
        write_fixture(dir.path(), "details.csv", DETAILS_CSV);
        write_fixture(dir.path(), "metadata.csv", METADATA_CSV);

        let dataset = MeteoDataset::load(&fixture_config(dir.path())).unwrap();

        assert_eq!(dataset.stations.len(), 2);
        assert_eq!(dataset.stations[0].code, "D5");
        assert_eq!(dataset.stations[0].name, "Barcelona - Observatori Fabra");
        assert!(dataset.stations[0].latitude.is_some());

        assert_eq!(dataset.details.len(), 3);
        assert_eq!(
            dataset.details[0],
            DetailRecord::new("2022-02-01", "X4", "TM", "10.0")
        );

        assert_eq!(dataset.metadata.len(), 2);
        assert_eq!(dataset.metadata[1].acronym, "PPT");
        assert_eq!(dataset.metadata[1].description, "Precipitació acumulada");
    }

    #[test]
    fn narrow_detail_file_is_missing_columns() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "stations.csv", STATIONS_CSV);
        write_fixture(
            dir.path(),
            "details.csv",
            "DATA_LECTURA,CODI_ESTACIO\n2022-02-01,X4\n",
        );
        write_fixture(dir.path(), "metadata.csv", METADATA_CSV);

        let err = MeteoDataset::load(&fixture_config(dir.path())).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingColumns {
                expected: 5,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn rows_with_empty_used_cells_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture(dir.path(), "stations.csv", STATIONS_CSV);
        write_fixture(
            dir.path(),
            "details.csv",
            "DATA_LECTURA,DATA_EXTREM,CODI_ESTACIO,ACRONIM,VALOR_LECTURA,CODI_ESTAT\n\
             2022-02-01,,X4,TM,10.0,V\n\
             2022-02-01,,X8,TM,,V\n",
        );
        write_fixture(dir.path(), "metadata.csv", METADATA_CSV);

        let dataset = MeteoDataset::load(&fixture_config(dir.path())).unwrap();
        assert_eq!(dataset.details.len(), 1);
        assert_eq!(dataset.details[0].station, "X4");
    }
}
