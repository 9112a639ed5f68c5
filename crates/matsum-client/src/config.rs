//! TOML-based configuration for the client.
//!
//! Reads `Config` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\Matsum\config.toml`
//! - Linux:    `~/.config/matsum/config.toml`
//! - macOS:    `~/Library/Application Support/Matsum/config.toml`
//!
//! Every field has a serde default, so a missing file or a partial file
//! works on first run. The generated-value range is validated at load time
//! because an empty range would make matrix generation panic later.

use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

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

    /// The generator value range is empty.
    #[error("generator range [{min}, {max}) is empty")]
    EmptyGeneratorRange { min: u32, max: u32 },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level client configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Address of the summation service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// Hostname or IP of the service.
    #[serde(default = "default_host")]
    pub host: String,
    /// TCP port of the service.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Console display policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Largest matrix edge length whose body is still printed; anything
    /// bigger is consumed from the wire but replaced by a notice.
    #[serde(default = "default_max_printed_size")]
    pub max_printed_size: u32,
}

/// Value range for generated test matrices, half-open `[min, max)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    #[serde(default = "default_min_value")]
    pub min_value: u32,
    #[serde(default = "default_max_value")]
    pub max_value: u32,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_host() -> String {
    "localhost".to_string()
}
fn default_port() -> u16 {
    7878
}
fn default_max_printed_size() -> u32 {
    10
}
fn default_min_value() -> u32 {
    0
}
fn default_max_value() -> u32 {
    1000
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_printed_size: default_max_printed_size(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_value: default_min_value(),
            max_value: default_max_value(),
        }
    }
}

impl NetworkConfig {
    /// `host:port` in the form `TcpStream::connect` accepts.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl GeneratorConfig {
    /// The half-open value range for generated matrices.
    pub fn range(&self) -> Range<u32> {
        self.min_value..self.max_value
    }
}

impl Config {
    /// Checks cross-field constraints that serde defaults cannot express.
    ///
    /// # Errors
    ///
    /// [`ConfigError::EmptyGeneratorRange`] when `min_value >= max_value`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.generator.min_value >= self.generator.max_value {
            return Err(ConfigError::EmptyGeneratorRange {
                min: self.generator.min_value,
                max: self.generator.max_value,
            });
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
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads and validates `Config` from disk, returning `Config::default()` if
/// the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::EmptyGeneratorRange`] for an unusable value range.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_file_path()?;

    let config = match std::fs::read_to_string(&path) {
        Ok(content) => toml::from_str(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Config::default(),
        Err(e) => return Err(ConfigError::Io { path, source: e }),
    };
    config.validate()?;
    Ok(config)
}

/// Persists `config` to disk, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &Config) -> Result<(), ConfigError> {
    let path = config_file_path()?;

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(())
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("Matsum"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("matsum"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("Matsum")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
