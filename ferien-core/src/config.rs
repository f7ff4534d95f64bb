//! Planner configuration at ~/.config/ferienplaner/config.toml
//!
//! Every key can be overridden through a `FERIEN_`-prefixed environment
//! variable (`FERIEN_PORT=3001`, `FERIEN_DATA_PATH=/tmp/v.json`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::days_off::{CoverageSettings, WeekdaySet};
use crate::error::{FerienError, FerienResult};
use crate::holidays::DEFAULT_API_URL;

static DEFAULT_DATA_PATH: &str = "~/.local/share/ferienplaner/vacations.json";
pub const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 3;

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_school_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

fn default_p1_name() -> String {
    "Papa".to_string()
}

fn default_p2_name() -> String {
    "Mama".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_school_api_url")]
    pub school_api_url: String,

    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub p1_days_off: Vec<u8>,

    #[serde(default)]
    pub p2_days_off: Vec<u8>,

    #[serde(default = "default_p1_name")]
    pub p1_name: String,

    #[serde(default = "default_p2_name")]
    pub p2_name: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            data_path: default_data_path(),
            port: default_port(),
            school_api_url: default_school_api_url(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            p1_days_off: Vec::new(),
            p2_days_off: Vec::new(),
            p1_name: default_p1_name(),
            p2_name: default_p2_name(),
        }
    }
}

impl PlannerConfig {
    pub fn config_path() -> FerienResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FerienError::Config("Could not determine config directory".into()))?
            .join("ferienplaner");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user's config file, creating a commented default on first run.
    pub fn load() -> FerienResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from an explicit file (which may be missing) plus the environment.
    pub fn load_from(path: &Path) -> FerienResult<Self> {
        let config: PlannerConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("FERIEN")
                    .list_separator(",")
                    .with_list_parse_key("p1_days_off")
                    .with_list_parse_key("p2_days_off")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| FerienError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| FerienError::Config(e.to_string()))?;

        config.coverage_settings()?;
        Ok(config)
    }

    /// Store path with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_path.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Recurring days off as the explicit engine input.
    pub fn coverage_settings(&self) -> FerienResult<CoverageSettings> {
        Ok(CoverageSettings::new(
            WeekdaySet::from_days(&self.p1_days_off)?,
            WeekdaySet::from_days(&self.p2_days_off)?,
        ))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> FerienResult<()> {
        let contents = format!(
            "\
# Ferienplaner configuration

# Where vacation assignments are stored:
# data_path = \"{DEFAULT_DATA_PATH}\"

# Port of ferien-server:
# port = {DEFAULT_PORT}

# School holiday API (year is appended) and its timeout:
# school_api_url = \"{DEFAULT_API_URL}\"
# fetch_timeout_secs = {DEFAULT_FETCH_TIMEOUT_SECS}

# Recurring days off, 0 = Sunday .. 6 = Saturday:
# p1_days_off = [3]
# p2_days_off = [5]

# Display names:
# p1_name = \"Papa\"
# p2_name = \"Mama\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FerienError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| FerienError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
