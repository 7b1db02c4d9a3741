//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional - if not specified, hardcoded defaults are used.
/// Corresponds to `~/.config/pkgview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Directory of saved insight responses. When unset the mock source is used.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Simulated latency of the mock source in milliseconds.
    #[serde(default)]
    pub mock_latency_ms: Option<u64>,

    /// Dependencies shown before the list is expanded.
    #[serde(default)]
    pub dependency_preview: Option<usize>,

    /// Scorecard checks listed in the scorecard card.
    #[serde(default)]
    pub scorecard_preview: Option<usize>,

    /// Disable colors.
    #[serde(default)]
    pub no_color: Option<bool>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Saved-response directory, if any.
    pub data_dir: Option<PathBuf>,
    /// Mock source latency.
    pub mock_latency_ms: u64,
    /// Dependency preview length.
    pub dependency_preview: usize,
    /// Scorecard preview length.
    pub scorecard_preview: usize,
    /// Colors disabled.
    pub no_color: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            log_file_path: default_log_path(),
            data_dir: None,
            mock_latency_ms: 500,
            dependency_preview: 10,
            scorecard_preview: 5,
            no_color: false,
        }
    }
}

impl ResolvedConfig {
    /// Mock latency as a `Duration`.
    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.mock_latency_ms)
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/pkgview/pkgview.log` on Unix-like systems,
/// or appropriate platform path on other systems.
///
/// If state directory cannot be determined, falls back to current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("pkgview").join("pkgview.log")
    } else {
        PathBuf::from("pkgview.log")
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/pkgview/config.toml` on Unix, appropriate path on other platforms.
/// Returns `None` if home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pkgview").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `PKGVIEW_CONFIG` environment variable
/// 3. Default path `~/.config/pkgview/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("PKGVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        data_dir: config.data_dir.or(defaults.data_dir),
        mock_latency_ms: config.mock_latency_ms.unwrap_or(defaults.mock_latency_ms),
        dependency_preview: config
            .dependency_preview
            .unwrap_or(defaults.dependency_preview),
        scorecard_preview: config
            .scorecard_preview
            .unwrap_or(defaults.scorecard_preview),
        no_color: config.no_color.unwrap_or(defaults.no_color),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `PKGVIEW_DATA_DIR`: Override data directory
/// - `PKGVIEW_LOG_FILE`: Override log file path
/// - `PKGVIEW_MOCK_LATENCY_MS`: Override mock latency (ignored unless an integer)
/// - `NO_COLOR`: Any value disables colors
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(dir) = std::env::var("PKGVIEW_DATA_DIR") {
        config.data_dir = Some(PathBuf::from(dir));
    }

    if let Ok(path) = std::env::var("PKGVIEW_LOG_FILE") {
        config.log_file_path = PathBuf::from(path);
    }

    if let Some(ms) = std::env::var("PKGVIEW_MOCK_LATENCY_MS")
        .ok()
        .and_then(|v| v.trim().parse().ok())
    {
        config.mock_latency_ms = ms;
    }

    if std::env::var_os("NO_COLOR").is_some() {
        config.no_color = true;
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// CLI args have the highest precedence and override all other sources.
/// Only applies overrides for flags that were explicitly set by the user.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    data_dir_override: Option<PathBuf>,
    no_color_override: Option<bool>,
) -> ResolvedConfig {
    if let Some(dir) = data_dir_override {
        config.data_dir = Some(dir);
    }

    if let Some(no_color) = no_color_override {
        config.no_color = no_color;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
