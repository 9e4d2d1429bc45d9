//! TOML-based configuration for KeyCoder.
//!
//! Reads `KeyCoderConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\KeyCoder\config.toml`
//! - Linux:    `~/.config/keycoder/config.toml`
//! - macOS:    `~/Library/Application Support/KeyCoder/config.toml`
//!
//! A missing file is not an error: every field has a default, so the
//! library behaves the same with no config file at all.
//!
//! ```toml
//! [events]
//! post_delay_micros = 9000
//! tap = "hid"
//!
//! [logging]
//! log_level = "info"
//! ```
//!
//! # Post delay floor
//!
//! Every posted event is followed by a pause of at least
//! [`MIN_POST_DELAY_MICROS`].  The config can lengthen the pause but never
//! shorten it; [`KeyCoderConfig::validate`] rejects smaller values.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The minimum pause after every posted event, in microseconds.
pub const MIN_POST_DELAY_MICROS: u64 = 9_000;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The config parsed but holds a value outside its allowed range.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct KeyCoderConfig {
    #[serde(default)]
    pub events: EventConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Settings for posted keyboard events.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventConfig {
    /// Pause after each posted event.  Must be at least 9000.
    #[serde(default = "default_post_delay_micros")]
    pub post_delay_micros: u64,
    /// Where in the OS event pipeline events are injected.
    #[serde(default)]
    pub tap: EventTap,
}

/// Settings for the diagnostic binary's log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Injection point for synthesized events.
///
/// `Hid` is the lowest level: events enter the stream where hardware events
/// do, and applications cannot tell them apart from a physical keyboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventTap {
    #[default]
    Hid,
    Session,
    AnnotatedSession,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_post_delay_micros() -> u64 {
    MIN_POST_DELAY_MICROS
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            post_delay_micros: default_post_delay_micros(),
            tap: EventTap::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl EventConfig {
    pub fn post_delay(&self) -> Duration {
        Duration::from_micros(self.post_delay_micros)
    }
}

impl KeyCoderConfig {
    /// Parses and validates a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `post_delay_micros` is below
    /// [`MIN_POST_DELAY_MICROS`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.events.post_delay_micros < MIN_POST_DELAY_MICROS {
            return Err(ConfigError::Invalid(format!(
                "events.post_delay_micros must be at least {MIN_POST_DELAY_MICROS}, got {}",
                self.events.post_delay_micros
            )));
        }
        Ok(())
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads the config from the platform location, or defaults if absent.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<KeyCoderConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads the config from the platform location, falling back to defaults
/// when there is no file or no platform config directory at all.
///
/// # Errors
///
/// See [`load_config_at`].
pub fn load_config_or_default() -> Result<KeyCoderConfig, ConfigError> {
    load_config_at(config_file_path().ok().as_deref())
}

/// Loads the config at `path`, or defaults when `path` is `None`.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config_at(path: Option<&Path>) -> Result<KeyCoderConfig, ConfigError> {
    match path {
        Some(path) => load_config_from(path),
        None => {
            tracing::debug!("no platform config directory, using defaults");
            Ok(KeyCoderConfig::default())
        }
    }
}

/// Loads the config at `path`, returning `KeyCoderConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if a value is out of range.
pub fn load_config_from(path: &Path) -> Result<KeyCoderConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => KeyCoderConfig::from_toml_str(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(KeyCoderConfig::default())
        }
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Writes `config` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if `config` would not load back,
/// [`ConfigError::Io`] for file-system failures, or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config_to(path: &Path, config: &KeyCoderConfig) -> Result<(), ConfigError> {
    config.validate()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("KeyCoder"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("keycoder"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("KeyCoder"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
