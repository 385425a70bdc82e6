//! ObjectSkipper Settings Crate
//!
//! Handles filter configuration: the interpreter socket path, the M-codes
//! bound to the control operations, and logging options.

pub mod config;
pub mod error;

pub use config::{LogFormat, Settings, DEFAULT_SOCKET_PATH};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
