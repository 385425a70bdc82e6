//! # ObjectSkipper
//!
//! Cancels individual objects of a running print by filtering the
//! firmware's command stream:
//! - Learns which slicer comments mark object boundaries
//! - Tracks the object currently being printed
//! - Suppresses the commands of objects the operator cancelled
//!
//! ## Architecture
//!
//! ObjectSkipper is organized as a workspace with multiple crates:
//!
//! 1. **objectskipper-core** - Code model, interception seam, object filter
//! 2. **objectskipper-communication** - Unix socket interception connection
//! 3. **objectskipper-settings** - Configuration files and validation
//! 4. **objectskipper** - Main binary that integrates all crates

pub mod cli;

pub use objectskipper_communication::{InterceptionMode, ShutdownHandle, SocketInterceptConnection};
pub use objectskipper_core::{
    Code, CodeKind, CodeType, ConnectionError, ControlCodes, Decision, FilterState,
    InterceptConnection, ObjectFilter, ObjectRegistry, PatternRegistry, ResolveResult,
};
pub use objectskipper_settings::{LogFormat, Settings, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Console output, pretty or JSON
/// - RUST_LOG environment variable support
pub fn init_logging(format: LogFormat) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_level(true)
                .with_line_number(true)
                .pretty();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stdout)
                .with_target(true)
                .with_level(true)
                .json();

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .try_init()?;
        }
    }

    Ok(())
}
