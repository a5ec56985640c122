//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.unitconv/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::engine::TemperatureMode;
use crate::core::history::{DEFAULT_MAX_ITEMS, default_history_path};
use crate::core::refresh::DEFAULT_REFRESH_INTERVAL;
use crate::core::units::Category;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UnitConvConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub rates: RatesConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub default_category: Option<String>,
    pub strict_temperature: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HistoryConfig {
    pub max_items: Option<usize>,
    pub file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RatesConfig {
    pub refresh_interval_secs: Option<u64>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub category: Category,
    pub temperature_mode: TemperatureMode,
    pub history_max_items: usize,
    /// `None` keeps history in memory only (no home directory).
    pub history_file: Option<PathBuf>,
    pub refresh_interval: Duration,
}

/// Values supplied on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub category: Option<String>,
    pub history_file: Option<PathBuf>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.unitconv/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".unitconv").join("config.toml"))
}

/// Load config from `~/.unitconv/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `UnitConvConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<UnitConvConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(UnitConvConfig::default());
        }
    };
    load_config_from(&path)
}

/// Same as [`load_config`] for an explicit path.
pub fn load_config_from(path: &Path) -> Result<UnitConvConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(UnitConvConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: UnitConvConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# unitconv configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_category = "length"        # length, weight, area, volume, speed, time, temperature, currency
# strict_temperature = false         # true: unknown temperature units are errors instead of Celsius

# [history]
# max_items = 10
# file = "/home/me/.unitconv/history.json"   # Or set UNITCONV_HISTORY_FILE env var

# [rates]
# refresh_interval_secs = 300
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &UnitConvConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Category: CLI → env → config → default
    let category = cli
        .category
        .clone()
        .or_else(|| std::env::var("UNITCONV_CATEGORY").ok())
        .or_else(|| config.general.default_category.clone())
        .and_then(|key| {
            let parsed = Category::from_key(&key);
            if parsed.is_none() {
                warn!("Unknown category '{}', falling back to default", key);
            }
            parsed
        })
        .unwrap_or_default();

    // History file: CLI → env → config → ~/.unitconv/history.json
    let history_file = cli
        .history_file
        .clone()
        .or_else(|| std::env::var("UNITCONV_HISTORY_FILE").ok().map(PathBuf::from))
        .or_else(|| config.history.file.as_ref().map(PathBuf::from))
        .or_else(default_history_path);

    let temperature_mode = if config.general.strict_temperature.unwrap_or(false) {
        TemperatureMode::Strict
    } else {
        TemperatureMode::Lenient
    };

    let refresh_interval = config
        .rates
        .refresh_interval_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REFRESH_INTERVAL);

    ResolvedConfig {
        category,
        temperature_mode,
        history_max_items: config.history.max_items.unwrap_or(DEFAULT_MAX_ITEMS),
        history_file,
        refresh_interval,
    }
}
