//! Serve command handler

use crate::config::{Environment, Settings};
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
    environment: Environment,
}

impl ServeCommandHandler {
    pub fn new(config: Settings, environment: Environment) -> Self {
        Self {
            config,
            environment,
        }
    }

    /// Start the server, or only report what would start when `dry_run`.
    pub async fn execute(self, dry_run: bool) -> anyhow::Result<()> {
        if dry_run {
            return self.validate_only();
        }

        Server::new(self.config, self.environment).run().await
    }

    /// Validate configuration without starting the server
    pub fn validate_only(&self) -> anyhow::Result<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid ({})", self.environment);
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!("✓ Database engine: {}", self.config.database.engine()?);
        println!("✓ Characters API: {}", self.config.characters.base_url);
        println!("Dry run completed successfully - configuration is ready for deployment");

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
