//! System-wide configuration
//!
//! Stored as TOML at `<config dir>/qnav/config.toml`, or wherever
//! `QNAV_CONFIG` points.

use anyhow::{Context, Result};
use debounce::Delay;
use navbar::{SortFilter, DEFAULT_SEARCH_DELAY_MS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "QNAV_CONFIG";

/// Upper bound for the search debounce
pub const MAX_DEBOUNCE_MS: i64 = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SystemConfig {
    pub search: SearchConfig,
    pub navigation: NavigationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a search is issued
    pub debounce_ms: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DELAY_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Anonymous users go through login before asking a question
    pub redirect_to_login: bool,
    /// Page path the login flow returns to
    pub base_url: String,
    pub default_filter: SortFilter,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            redirect_to_login: false,
            base_url: "/web/guest/questions".to_string(),
            default_filter: SortFilter::default(),
        }
    }
}

impl SystemConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        self.search_delay()?;
        if self.search.debounce_ms > MAX_DEBOUNCE_MS {
            anyhow::bail!(
                "search.debounce_ms must be at most {}, got {}",
                MAX_DEBOUNCE_MS,
                self.search.debounce_ms
            );
        }
        validate_base_url(&self.navigation.base_url)
    }

    /// Search debounce as a validated delay
    pub fn search_delay(&self) -> Result<Delay> {
        Delay::from_millis(self.search.debounce_ms).context("Invalid search.debounce_ms")
    }
}

/// Base URLs are page paths without origin
pub fn validate_base_url(base_url: &str) -> Result<()> {
    if !base_url.starts_with('/') {
        anyhow::bail!(
            "navigation.base_url must be an absolute path, got {:?}",
            base_url
        );
    }
    Ok(())
}

/// Location of the config file
pub fn config_file_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("qnav").join("config.toml"))
}

/// Load configuration, falling back to defaults when no file exists
pub fn load() -> Result<SystemConfig> {
    match config_file_path() {
        Some(path) => load_from(&path),
        None => Ok(SystemConfig::default()),
    }
}

pub fn load_from(path: &Path) -> Result<SystemConfig> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(SystemConfig::default());
    }

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: SystemConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

pub fn save(config: &SystemConfig) -> Result<()> {
    let path = config_file_path().context("Could not determine config file path")?;
    save_to(config, &path)
}

/// Write config atomically (temp file + rename)
pub fn save_to(config: &SystemConfig, path: &Path) -> Result<()> {
    config.validate()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, text).context("Failed to write temporary config file")?;
    std::fs::rename(&tmp, path).context("Failed to move config file into place")?;
    Ok(())
}

/// Create the config file with defaults if it does not exist yet
pub fn init_if_missing() -> Result<PathBuf> {
    let path = config_file_path().context("Could not determine config file path")?;
    if !path.exists() {
        save_to(&SystemConfig::default(), &path)?;
    }
    Ok(path)
}

pub fn example_config() -> &'static str {
    r#"# qnav configuration

[search]
# Quiet period (ms) after the last keystroke before a search is issued.
# Range: 0-10000. Negative values are rejected.
debounce_ms = 500

[navigation]
# Send anonymous users through login before asking a question
redirect_to_login = false
# Page path the login flow returns to
base_url = "/web/guest/questions"
# One of: latest-created, latest-edited, week, month
default_filter = "latest-created"
"#
}
