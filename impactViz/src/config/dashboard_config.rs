use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::config::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub bind_address: String,
    pub logo_urls: Vec<String>,
    pub fetch_timeout_secs: u64,  // Expiry is treated as a fetch failure
    pub logo_width: u32,          // Display width in pixels
    pub output_dir: PathBuf,      // Root for `export` runs
    pub export_dpi: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            logo_urls: vec![
                SUSTREND_LOGO_URL.to_string(),
                TTGREENFOODS_LOGO_URL.to_string(),
            ],
            fetch_timeout_secs: LOGO_FETCH_TIMEOUT_SECS,
            logo_width: LOGO_DISPLAY_WIDTH,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            export_dpi: EXPORT_DPI,
        }
    }
}

impl DashboardConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config JSON in {}", path.display()))?;
        Ok(config)
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "bind_address": "0.0.0.0:9000", "fetch_timeout_secs": 2 }"#)
            .expect("write config");

        let config = DashboardConfig::from_file(&path).expect("load config");
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.fetch_timeout_secs, 2);
        assert_eq!(config.logo_urls.len(), 2);
        assert_eq!(config.export_dpi, 300);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let err = DashboardConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }

    #[test]
    fn no_path_means_defaults() {
        let config = DashboardConfig::load(None).expect("defaults");
        assert_eq!(config, DashboardConfig::default());
    }
}
