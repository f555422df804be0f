use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment overrides for the two source URLs. These match the names
/// the publishing workflow already exports, so the binary runs without a
/// config file at all.
pub const MP_URL_ENV: &str = "SHEET_MP_CSV_URL";
pub const PT_URL_ENV: &str = "SHEET_PT_CSV_URL";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SourcesConfig {
    #[serde(default)]
    pub raw_materials_csv_url: Option<String>,
    #[serde(default)]
    pub finished_products_csv_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Config {
    /// Built-in defaults: no source URLs, artifacts under `./data`.
    pub fn minimal() -> Config {
        Config::default()
    }
}

/// Load the TOML config file, falling back to [`Config::minimal`] when
/// it does not exist. Environment variables override the source URLs
/// either way.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config: Config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content).with_context(|| "Failed to parse config file")?
    } else {
        Config::minimal()
    };

    if let Ok(url) = std::env::var(MP_URL_ENV) {
        if !url.trim().is_empty() {
            config.sources.raw_materials_csv_url = Some(url);
        }
    }
    if let Ok(url) = std::env::var(PT_URL_ENV) {
        if !url.trim().is_empty() {
            config.sources.finished_products_csv_url = Some(url);
        }
    }

    if config.output.dir.as_os_str().is_empty() {
        bail!("output.dir must not be empty");
    }

    Ok(config)
}
