//! CLI module for staff-rs
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Configuration merging (CLI args + config files)
//! - Command handlers for serve and migrate operations

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::{self, Settings};
use crate::logger::init_logger;

/// Load file configuration and apply CLI overrides.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<(Settings, config::Environment)> {
    let merger = ConfigurationMerger::load(cli).context("Configuration error")?;
    let settings = merger
        .merge_cli_args(cli)
        .context("Configuration merge error")?;
    Ok((settings, merger.environment()))
}

pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("Logger configuration error")?;

    init_logger(logger_config).context("Logger initialization error")
}

/// Full CLI lifecycle: configuration, logging, then the command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let (settings, environment) = load_and_merge_config(&cli)?;
    init_logger_from_settings(&settings)?;

    tracing::debug!(version = crate::pkg_version(), %environment, "Configuration loaded");

    execute_command(&cli, settings, environment).await
}
