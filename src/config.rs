//! Application Configuration
//! Paths to the MeteoCat CSV exports, with an optional JSON override file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Override file looked up in the working directory.
pub const CONFIG_FILE: &str = "meteoviz.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Data source settings. Defaults point at the fixed MeteoCat export
/// locations; `meteoviz.json` can re-point any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the three CSV exports.
    pub data_dir: PathBuf,
    pub stations_file: String,
    pub details_file: String,
    pub metadata_file: String,
    /// Stations charted individually in the temperature view.
    pub focus_stations: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("csv"),
            stations_file: "2020_MeteoCat_Estacions.csv".to_string(),
            details_file: "2022_MeteoCat_Detall_Estacions.csv".to_string(),
            metadata_file: "MeteoCat_Metadades.csv".to_string(),
            focus_stations: vec![
                "D5".to_string(),
                "X4".to_string(),
                "X8".to_string(),
                "X2".to_string(),
            ],
        }
    }
}

impl AppConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load `meteoviz.json` from the working directory, falling back to the
    /// defaults when the file is absent or malformed.
    pub fn load_or_default() -> Self {
        match Self::from_file(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            Err(ConfigError::Io(_)) => Self::default(),
            Err(err) => {
                log::warn!("ignoring {CONFIG_FILE}: {err}");
                Self::default()
            }
        }
    }

    pub fn stations_path(&self) -> PathBuf {
        self.data_dir.join(&self.stations_file)
    }

    pub fn details_path(&self) -> PathBuf {
        self.data_dir.join(&self.details_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.data_dir.join(&self.metadata_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_paths_match_fixed_exports() {
        let config = AppConfig::default();
        assert_eq!(
            config.stations_path(),
            PathBuf::from("csv/2020_MeteoCat_Estacions.csv")
        );
        assert_eq!(
            config.details_path(),
            PathBuf::from("csv/2022_MeteoCat_Detall_Estacions.csv")
        );
        assert_eq!(
            config.metadata_path(),
            PathBuf::from("csv/MeteoCat_Metadades.csv")
        );
        assert_eq!(config.focus_stations, ["D5", "X4", "X8", "X2"]);
    }

    #[test]
    fn partial_override_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "data_dir": "exports" }}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("exports"));
        assert_eq!(config.details_file, "2022_MeteoCat_Detall_Estacions.csv");
    }

    #[test]
    fn roundtrips_through_json() {
        let config = AppConfig {
            data_dir: PathBuf::from("data"),
            focus_stations: vec!["Z1".to_string()],
            ..AppConfig::default()
        };

        let json = serde_json::to_string(&config).unwrap();
        let back: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.data_dir, config.data_dir);
        assert_eq!(back.focus_stations, config.focus_stations);
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
