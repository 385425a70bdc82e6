//! Command-line interface

use crate::{LogFormat, Settings};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

/// Filter the commands of cancelled objects out of a running print.
#[derive(Parser, Debug, Default)]
#[command(name = "objectskipper", version, about)]
pub struct Cli {
    /// Config file (.toml or .json); defaults to the platform config dir
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path of the command interpreter's socket
    #[arg(long, alias = "socketPath")]
    pub socket_path: Option<PathBuf>,

    /// M-code to manage object identifier patterns
    #[arg(long)]
    pub idpattern: Option<i32>,

    /// M-code to manage object ids
    #[arg(long)]
    pub objectid: Option<i32>,

    /// M-code to list/add the current object id
    #[arg(long)]
    pub currentid: Option<i32>,

    /// M-code to disable filtering
    #[arg(long)]
    pub disable: Option<i32>,

    /// Log output format (pretty or json)
    #[arg(long)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Load the config file and apply flag overrides
    pub fn resolve_settings(&self) -> anyhow::Result<Settings> {
        let mut settings = Settings::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;
        self.apply(&mut settings);
        settings.validate().context("Invalid configuration")?;
        Ok(settings)
    }

    /// Overwrite every setting given on the command line
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.socket_path {
            settings.socket_path = path.clone();
        }
        if let Some(number) = self.idpattern {
            settings.manage_identifier_pattern = number;
        }
        if let Some(number) = self.objectid {
            settings.manage_object_ids = number;
        }
        if let Some(number) = self.currentid {
            settings.current_object_id = number;
        }
        if let Some(number) = self.disable {
            settings.disable = number;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
    }
}
