use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::City;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Location loaded when no city has been picked yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for DefaultCity {
    fn default() -> Self {
        Self {
            name: "Paris".to_string(),
            latitude: 48.8566,
            longitude: 2.3522,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Every key is optional in the file; missing keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Language of place names returned by the geocoding search, e.g. "en" or "fr".
    pub language: String,

    /// Maximum number of geocoding matches requested per search.
    pub result_count: u32,

    pub geocoding_url: String,
    pub forecast_url: String,

    pub request_timeout_secs: u64,

    /// Quiescence interval before a typed query is searched.
    pub debounce_ms: u64,

    pub user_agent: String,

    /// Example TOML:
    /// [default_city]
    /// name = "Paris"
    /// latitude = 48.8566
    /// longitude = 2.3522
    pub default_city: DefaultCity,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            result_count: 8,
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            request_timeout_secs: 10,
            debounce_ms: 350,
            user_agent: concat!("meteo/", env!("CARGO_PKG_VERSION")).to_string(),
            default_city: DefaultCity::default(),
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Remember a searched city as the fallback location, labelled with its display name.
    pub fn set_default_city(&mut self, city: &City) {
        self.default_city = DefaultCity {
            name: city.display_name(),
            latitude: city.latitude,
            longitude: city.longitude,
        };
    }

    pub fn set_language(&mut self, language: &str) -> Result<()> {
        let language = language.trim();
        if language.is_empty() {
            return Err(anyhow!("Language must not be empty (e.g. \"en\" or \"fr\")."));
        }

        self.language = language.to_lowercase();
        Ok(())
    }

    /// Load config from disk, or return the defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
