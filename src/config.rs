use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Locations of the GeoPlanet dump files (`.tsv` or `.tsv.gz`)
#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub places: PathBuf,
    pub aliases: Option<PathBuf>,
    pub adjacencies: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_locale")]
    pub default_locale: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
        }
    }
}

fn default_locale() -> String {
    "en".to_string()
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
