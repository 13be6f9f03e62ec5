//! Command-line interface.

use std::path::PathBuf;

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};

use crate::config::{Config, ConfigError};
use crate::model::{DurationTarget, Mood};

#[derive(Debug, Parser)]
#[command(
    name = "antiflow",
    about = "Submit video asset generation jobs and track them to completion",
    version
)]
pub struct Cli {
    /// Config file (defaults to ~/.config/antiflow/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Generation service base URL, including the /api/v1 prefix
    #[arg(long, global = true, env = "ANTIFLOW_BASE_URL")]
    pub base_url: Option<String>,

    /// Milliseconds between status checks
    #[arg(long, global = true)]
    pub interval_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive terminal UI (default)
    Tui,

    /// Submit a job and print its progress until it finishes
    Generate {
        /// What the video is about
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        topic: String,

        /// short, medium, long or a full label such as "Short (< 1 min)"
        #[arg(long)]
        duration: Option<DurationTarget>,

        /// motivational, educational, funny or serious
        #[arg(long)]
        mood: Option<Mood>,
    },

    /// Track an existing task until it finishes
    Watch {
        /// Task id returned by the service
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        task_id: String,
    },
}

impl Cli {
    /// Load the config file and apply command-line overrides.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };

        if let Some(base_url) = &self.base_url {
            config.service.base_url = base_url.clone();
        }
        if let Some(interval_ms) = self.interval_ms {
            config.polling.interval_ms = interval_ms;
        }

        config.validate()?;
        Ok(config)
    }
}
