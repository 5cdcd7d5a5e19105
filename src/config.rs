use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable naming the dataset to open at start-up.
pub const DATA_ENV_VAR: &str = "AQ_DASHBOARD_DATA";
/// Optional JSON config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "aq-dashboard.json";
pub const DEFAULT_DATA_PATH: &str = "data/combined_air_quality_data.csv";
const DEFAULT_WINDOW_SIZE: [f32; 2] = [1280.0, 860.0];

/// Contents of `aq-dashboard.json`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub data_path: Option<PathBuf>,
    pub window_size: Option<[f32; 2]>,
}

impl ConfigFile {
    /// Read the config file; a missing file is an empty config.
    pub fn read(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }
}

/// Start-up configuration after all sources are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Dataset to open at start-up.
    pub data_path: PathBuf,
    pub window_size: [f32; 2],
}

impl AppConfig {
    /// Merge sources: CLI argument, then environment, then config file, then defaults.
    pub fn resolve(cli_path: Option<String>, env_path: Option<String>, file: ConfigFile) -> Self {
        let non_empty = |p: Option<String>| p.filter(|p| !p.trim().is_empty());
        let data_path = non_empty(cli_path)
            .or(non_empty(env_path))
            .map(PathBuf::from)
            .or(file.data_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        Self {
            data_path,
            window_size: file.window_size.unwrap_or(DEFAULT_WINDOW_SIZE),
        }
    }

    /// Resolve from the process arguments, environment and working directory.
    pub fn from_env() -> Self {
        let cli_path = std::env::args().nth(1);
        let env_path = std::env::var(DATA_ENV_VAR).ok();
        let file = ConfigFile::read(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
            log::warn!("Ignoring config file: {e:#}");
            ConfigFile::default()
        });
        let config = Self::resolve(cli_path, env_path, file);
        log::info!("Data file: {}", config.data_path.display());
        config
    }
}
