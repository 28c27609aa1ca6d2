use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::{NOMINATIM_URL, OSRM_URL};
use crate::domain::{OsmKind, TravelMode};

fn default_nominatim_url() -> String {
    NOMINATIM_URL.to_string()
}

fn default_osrm_url() -> String {
    OSRM_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("poiroute/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Endpoints and transport settings for the upstream services
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_nominatim_url")]
    pub nominatim_url: String,
    #[serde(default = "default_osrm_url")]
    pub osrm_url: String,
    /// Nominatim's usage policy requires an identifying user agent
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Request timeout; `None` keeps the transport default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            nominatim_url: default_nominatim_url(),
            osrm_url: default_osrm_url(),
            user_agent: default_user_agent(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub kind: Option<OsmKind>,
    #[serde(default)]
    pub mode: Option<TravelMode>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub service: Option<ServiceConfig>,
}

impl FileConfig {
    /// Read and parse a config file at an explicit path
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        use anyhow::Context;

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Search the default locations and return the first config that parses
    pub fn load() -> Option<Self> {
        Self::load_from(&get_config_paths())
    }

    fn load_from(paths: &[PathBuf]) -> Option<Self> {
        paths
            .iter()
            .filter(|path| path.exists())
            .find_map(|path| Self::read_quietly(path))
    }

    /// Parse a discovered file, warning instead of failing on bad TOML
    fn read_quietly(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        toml::from_str::<Self>(&contents)
            .inspect_err(|e| eprintln!("Warning: Failed to parse config file {:?}: {}", path, e))
            .ok()
    }
}

const APP_NAME: &str = "poiroute";
const CONFIG_FILE: &str = "poiroute.toml";
const HIDDEN_CONFIG_FILE: &str = ".poiroute.toml";

/// Discovery order: working directory, platform config dir, then home
fn get_config_paths() -> Vec<PathBuf> {
    let working_dir = [PathBuf::from(CONFIG_FILE), PathBuf::from(HIDDEN_CONFIG_FILE)];
    let config_dir = dirs::config_dir()
        .map(|dir| [dir.join(APP_NAME).join("config.toml"), dir.join(CONFIG_FILE)]);
    let home = dirs::home_dir().map(|home| {
        [
            home.join(HIDDEN_CONFIG_FILE),
            home.join(".config").join(APP_NAME).join("config.toml"),
        ]
    });

    working_dir
        .into_iter()
        .chain(config_dir.into_iter().flatten())
        .chain(home.into_iter().flatten())
        .collect()
}
