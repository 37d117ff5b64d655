//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.rrbctl/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::Level;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct RrbConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub device: DeviceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeviceConfig {
    pub base_url: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

/// The RRB3 server always listens on 8080.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_FILE: &str = "rrbctl.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
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
// Startup Log
// ============================================================================

/// Records produced while loading config.
///
/// The file logger's path and level come from the config itself, so nothing
/// can be logged until loading is done. `main` replays these once the logger
/// is installed.
#[derive(Debug, Default)]
pub struct StartupLog {
    records: Vec<(Level, String)>,
}

impl StartupLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, level: Level, message: String) {
        self.records.push((level, message));
    }

    pub fn records(&self) -> &[(Level, String)] {
        &self.records
    }

    /// Sends every buffered record to the installed logger, oldest first.
    pub fn replay(self) {
        for (level, message) in self.records {
            log::log!(level, "{}", message);
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.rrbctl/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".rrbctl").join("config.toml"))
}

/// Load config from `~/.rrbctl/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `RrbConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(startup: &mut StartupLog) -> Result<RrbConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            startup.push(
                Level::Warn,
                "Could not determine home directory, using default config".to_string(),
            );
            return Ok(RrbConfig::default());
        }
    };
    load_config_from(&path, startup)
}

pub fn load_config_from(
    path: &Path,
    startup: &mut StartupLog,
) -> Result<RrbConfig, ConfigError> {
    if !path.exists() {
        startup.push(
            Level::Info,
            format!("No config file found, generating default at {}", path.display()),
        );
        generate_default_config(path, startup);
        return Ok(RrbConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: RrbConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    startup.push(Level::Info, format!("Loaded config from {}", path.display()));
    startup.push(Level::Debug, format!("Config: {:?}", config));
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path, startup: &mut StartupLog) {
    let default_content = r#"# rrbctl Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [device]
# base_url = "http://raspberrypi.local:8080"   # Or set RRB_BASE_URL, or pass --url

# [general]
# log_level = "debug"                # off, error, warn, info, debug, trace
# log_file = "rrbctl.log"            # Relative to the working directory
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        startup.push(Level::Warn, format!("Failed to create config directory: {e}"));
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        startup.push(Level::Warn, format!("Failed to write default config: {e}"));
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_url` is the `--url` flag (None = not specified).
pub fn resolve(
    config: &RrbConfig,
    cli_url: Option<&str>,
    startup: &mut StartupLog,
) -> ResolvedConfig {
    resolve_with_env(config, cli_url, std::env::var("RRB_BASE_URL").ok(), startup)
}

fn resolve_with_env(
    config: &RrbConfig,
    cli_url: Option<&str>,
    env_url: Option<String>,
    startup: &mut StartupLog,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_url
        .map(|s| s.to_string())
        .or(env_url)
        .or_else(|| config.device.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse::<LevelFilter>().unwrap_or_else(|_| {
            startup.push(
                Level::Warn,
                format!("Unknown log_level '{level}', using {DEFAULT_LOG_LEVEL}"),
            );
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    ResolvedConfig {
        base_url,
        log_level,
        log_file: PathBuf::from(
            config
                .general
                .log_file
                .as_deref()
                .unwrap_or(DEFAULT_LOG_FILE),
        ),
    }
}
