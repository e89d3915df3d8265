//! Application configuration.
//! Optional JSON file overriding the dataset location and export size.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Canonical location of the historical automobile sales dataset.
pub const DEFAULT_DATA_URL: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "salesboard.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL the dataset CSV is downloaded from at startup.
    pub data_url: String,
    /// Local CSV used instead of the download when set.
    pub csv_path: Option<PathBuf>,
    /// Pixel size of the exported report image.
    pub export_width: u32,
    pub export_height: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            csv_path: None,
            export_width: 1600,
            export_height: 1200,
        }
    }
}

impl AppConfig {
    /// Load the config file from the working directory, falling back to
    /// defaults when it is absent or unreadable.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(text) = fs::read_to_string(path) else {
            return Self::default();
        };

        match serde_json::from_str(&text) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_canonical_dataset() {
        let config = AppConfig::default();
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
        assert!(config.csv_path.is_none());
        assert!(config.export_width > 0 && config.export_height > 0);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let config: AppConfig =
            serde_json::from_str(r#"{"export_width": 800}"#).expect("valid json");
        assert_eq!(config.export_width, 800);
        assert_eq!(config.export_height, AppConfig::default().export_height);
        assert_eq!(config.data_url, DEFAULT_DATA_URL);
    }
}
