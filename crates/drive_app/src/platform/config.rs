use std::fs;
use std::path::Path;

use drive_logging::{drive_error, drive_info, drive_warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILENAME: &str = "drive_config.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct AppConfig {
    /// Base URL of the backend API.
    pub endpoint: String,
    /// Destination folder for uploads started from the shell.
    pub folder_id: String,
    pub max_upload_bytes: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080/api".to_string(),
            folder_id: "root".to_string(),
            max_upload_bytes: 256 * 1024 * 1024,
        }
    }
}

/// Loads the config, writing the defaults on first run. Parse failures are
/// logged and defaulted, never fatal.
pub(crate) fn load_config(dir: &Path) -> AppConfig {
    let path = dir.join(CONFIG_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let config = AppConfig::default();
            save_config(dir, &config);
            return config;
        }
        Err(err) => {
            drive_warn!("Failed to read config from {:?}: {}", path, err);
            return AppConfig::default();
        }
    };

    match ron::from_str(&content) {
        Ok(config) => {
            drive_info!("Loaded config from {:?}", path);
            config
        }
        Err(err) => {
            drive_warn!("Failed to parse config from {:?}: {}", path, err);
            AppConfig::default()
        }
    }
}

pub(crate) fn save_config(dir: &Path, config: &AppConfig) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(config, pretty) {
        Ok(text) => text,
        Err(err) => {
            drive_error!("Failed to serialize config: {}", err);
            return;
        }
    };

    let path = dir.join(CONFIG_FILENAME);
    if let Err(err) = fs::write(&path, content) {
        drive_error!("Failed to write config to {:?}: {}", path, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path());
        assert_eq!(config, AppConfig::default());
        assert!(dir.path().join(CONFIG_FILENAME).exists());
    }

    #[test]
    fn round_trips_saved_values() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            endpoint: "https://drive.example.com/api".to_string(),
            folder_id: "shared".to_string(),
            max_upload_bytes: 1024,
        };
        save_config(dir.path(), &config);
        assert_eq!(load_config(dir.path()), config);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), "not ron at all (").unwrap();
        assert_eq!(load_config(dir.path()), AppConfig::default());
    }
}
