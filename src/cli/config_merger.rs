//! Configuration merger for CLI arguments and config files
//!
//! CLI arguments sit on top of the layered configuration: files first, then
//! `STAFF_*` variables, then flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Environment, Settings};

/// Applies CLI overrides on top of file-based configuration
pub struct ConfigurationMerger {
    base_config: Settings,
    environment: Environment,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings, environment: Environment) -> Self {
        Self {
            base_config,
            environment,
        }
    }

    /// Load the base configuration honouring `--config` and `--env`.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        let environment = loader.environment();
        Ok(Self::new(loader.load()?, environment))
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Apply CLI overrides and re-validate the result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if let Some(level) = cli.global_log_level() {
            config.logger.level = level.as_str().to_string();
        }

        if let Commands::Serve {
            host,
            port,
            log_level,
            ..
        } = cli.command()
        {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            // Subcommand level beats --verbose/--quiet
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn base() -> Settings {
        let mut settings = Settings::default();
        settings.database.engine = "memory".to_string();
        settings
    }

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(base(), Environment::Test)
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_no_overrides_keeps_base() {
        assert_eq!(merge(&["staff-rs"]), base());
    }

    #[test]
    fn test_serve_overrides() {
        let settings = merge(&[
            "staff-rs",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "9090",
        ]);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9090);
    }

    #[test]
    fn test_log_level_precedence() {
        assert_eq!(merge(&["staff-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["staff-rs", "--quiet"]).logger.level, "error");
        assert_eq!(
            merge(&["staff-rs", "--quiet", "serve", "--log-level", "trace"])
                .logger
                .level,
            "trace"
        );
    }

    #[test]
    fn test_merged_config_is_validated() {
        let cli = Cli::try_parse_from(["staff-rs"]).unwrap();
        let mut settings = base();
        settings.database.engine = "postgres".to_string();
        let merger = ConfigurationMerger::new(settings, Environment::Test);
        assert!(matches!(
            merger.merge_cli_args(&cli),
            Err(ConfigError::ValidationError { .. })
        ));
        assert_eq!(merger.environment(), Environment::Test);
    }
}
