//! Configuration for ObjectSkipper
//!
//! Provides configuration file handling and validation.
//! Supports JSON and TOML file formats; the default file lives in the
//! platform config directory.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. Command-line flags are applied on top by the binary.

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
use objectskipper_core::filter::dispatcher::{
    DEFAULT_CURRENT_OBJECT_ID, DEFAULT_DISABLE, DEFAULT_MANAGE_IDENTIFIER_PATTERN,
    DEFAULT_MANAGE_OBJECT_IDS,
};
use objectskipper_core::ControlCodes;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default path of the command interpreter's socket
pub const DEFAULT_SOCKET_PATH: &str = "/var/run/dsf/dcs.sock";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Complete filter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Path of the command interpreter's socket
    pub socket_path: PathBuf,
    /// M-code managing object identifier patterns
    pub manage_identifier_pattern: i32,
    /// M-code managing object ids
    pub manage_object_ids: i32,
    /// M-code listing or marking the current object
    pub current_object_id: i32,
    /// M-code disabling filtering
    pub disable: i32,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            socket_path: PathBuf::from(DEFAULT_SOCKET_PATH),
            manage_identifier_pattern: DEFAULT_MANAGE_IDENTIFIER_PATTERN,
            manage_object_ids: DEFAULT_MANAGE_OBJECT_IDS,
            current_object_id: DEFAULT_CURRENT_OBJECT_ID,
            disable: DEFAULT_DISABLE,
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location, `<config dir>/objectskipper/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("objectskipper").join("config.toml"))
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::LoadError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let settings: Self = match file_format(path)? {
            FileFormat::Json => serde_json::from_str(&content)?,
            FileFormat::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path` if given, else from the default location if it exists
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match file_format(path)? {
            FileFormat::Json => serde_json::to_string_pretty(self)?,
            FileFormat::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> ConfigResult<()> {
        if self.socket_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("socket_path".to_string()));
        }

        let bindings = self.named_codes();
        for (name, number) in &bindings {
            if *number < 0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: name.to_string(),
                    value: number.to_string(),
                });
            }
        }

        for (i, (first, number)) in bindings.iter().enumerate() {
            if let Some((second, _)) = bindings[i + 1..].iter().find(|(_, n)| n == number) {
                return Err(ConfigError::DuplicateControlCode {
                    number: *number,
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Control M-code bindings for the filter
    pub fn control_codes(&self) -> ControlCodes {
        ControlCodes {
            manage_identifier_pattern: self.manage_identifier_pattern,
            manage_object_ids: self.manage_object_ids,
            current_object_id: self.current_object_id,
            disable: self.disable,
        }
    }

    fn named_codes(&self) -> [(&'static str, i32); 4] {
        [
            ("manage_identifier_pattern", self.manage_identifier_pattern),
            ("manage_object_ids", self.manage_object_ids),
            ("current_object_id", self.current_object_id),
            ("disable", self.disable),
        ]
    }
}

enum FileFormat {
    Json,
    Toml,
}

fn file_format(path: &Path) -> ConfigResult<FileFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(FileFormat::Json),
        Some("toml") => Ok(FileFormat::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or_default().to_string(),
        )),
    }
}
