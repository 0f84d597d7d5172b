//! Configuration management for roster.
//!
//! Loads configuration from ${ROSTER_HOME}/config.toml with sensible defaults.
//! Environment variables override file values; both are resolved exactly once
//! at startup, so the rest of the program sees a single settled configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for roster configuration and data directories.
    //!
    //! ROSTER_HOME resolution order:
    //! 1. ROSTER_HOME environment variable (if set)
    //! 2. ~/.config/roster (default)

    use std::path::PathBuf;

    /// Returns the roster home directory.
    ///
    /// Checks ROSTER_HOME env var first, falls back to ~/.config/roster
    pub fn roster_home() -> PathBuf {
        if let Ok(home) = std::env::var("ROSTER_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("roster"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        roster_home().join("config.toml")
    }

    /// Returns the directory for TUI log files.
    pub fn logs_dir() -> PathBuf {
        roster_home().join("logs")
    }
}

/// Run mode for the server process.
///
/// Production mode additionally serves the prebuilt static asset bundle as a
/// catch-all fallback route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Development,
    Production,
}

impl RunMode {
    /// Parses a mode string the way NODE_ENV-style values are usually spelled.
    /// Unknown values fall back to development.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => RunMode::Production,
            _ => RunMode::Development,
        }
    }
}

/// Server-side configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,
    /// Origin allowed to issue cross-origin GETs.
    pub client_origin: String,
    /// Run mode (development or production).
    pub mode: RunMode,
    /// Path to the users.json dataset.
    pub data_path: PathBuf,
    /// Directory holding the prebuilt static bundle (production fallback).
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: Config::DEFAULT_PORT,
            client_origin: Config::DEFAULT_CLIENT_ORIGIN.to_string(),
            mode: RunMode::Development,
            data_path: PathBuf::from("data/users.json"),
            static_dir: None,
        }
    }
}

/// Client-side configuration: one `{base_url, timeout_ms}` pair, settled at
/// startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the API, including the /api/v1 prefix.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Page size requested from the server.
    pub page_limit: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Config::DEFAULT_BASE_URL.to_string(),
            timeout_ms: Config::DEFAULT_TIMEOUT_MS,
            page_limit: Config::DEFAULT_PAGE_LIMIT,
        }
    }
}

/// Table UI tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Extra rows computed beyond the viewport on each side.
    pub overscan: usize,
    /// Height of one table row in terminal rows.
    pub row_height: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            overscan: Config::DEFAULT_OVERSCAN,
            row_height: 1,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    const DEFAULT_PORT: u16 = 5000;
    const DEFAULT_CLIENT_ORIGIN: &str = "http://localhost:5173";
    const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/v1";
    const DEFAULT_TIMEOUT_MS: u64 = 10_000;
    const DEFAULT_PAGE_LIMIT: u32 = 50;
    const DEFAULT_OVERSCAN: usize = 10;

    /// Loads configuration from the default config path and applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&paths::config_path())?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Overlays environment variables onto file values.
    ///
    /// Precedence is env > file > default, the same order used for every
    /// other externally supplied setting.
    fn apply_env_overrides(&mut self) {
        if let Some(port) = env_var("ROSTER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(origin) = env_var("ROSTER_CLIENT_URL") {
            self.server.client_origin = origin;
        }
        if let Some(mode) = env_var("ROSTER_MODE") {
            self.server.mode = RunMode::parse(&mode);
        }
        if let Some(base_url) = env_var("ROSTER_BASE_URL") {
            self.client.base_url = base_url;
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to move config into place at {}", path.display()))?;
        Ok(())
    }
}

/// Reads an environment variable, treating empty values as unset.
fn env_var(name: &str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
/// To update, edit default_config.toml directly.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}
