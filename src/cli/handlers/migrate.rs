//! Migrate command handler
//!
//! Handles database migration operations including dry-run and rollback.

use crate::config::{DatabaseEngine, Settings};
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// # Errors
    /// - The configured engine has no schema (`memory`)
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        self.ensure_postgres()?;

        let database_url = self.config.database.url.clone();

        if dry_run {
            println!("Checking for pending migrations...");
            let pending = pending_migrations(database_url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            println!("Rolling back up to {} migration(s)...", steps);
            let reverted = revert_migrations(database_url, steps).await?;
            tracing::info!(count = reverted.len(), "Migrations reverted");
            if reverted.is_empty() {
                println!("✓ Nothing to roll back");
            } else {
                println!("✓ Rolled back {} migration(s):", reverted.len());
                for version in &reverted {
                    println!("  - {}", version);
                }
            }
            return Ok(());
        }

        println!("Running database migrations...");
        let applied = run_pending_migrations(database_url).await?;
        tracing::info!(count = applied.len(), "Migrations applied");
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }

        Ok(())
    }

    fn ensure_postgres(&self) -> AppResult<()> {
        match self.config.database.engine()? {
            DatabaseEngine::Postgres => Ok(()),
            DatabaseEngine::Memory => Err(AppError::Validation {
                field: "database.engine".to_string(),
                reason: "Migrations require the postgres engine".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_engine_is_rejected() {
        let mut config = Settings::default();
        config.database.engine = "memory".to_string();

        match MigrateCommandHandler::new(config).execute(false, None).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "database.engine"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_database_url_is_rejected() {
        let config = Settings::default();
        assert!(matches!(
            MigrateCommandHandler::new(config).execute(true, None).await,
            Err(AppError::Configuration { .. })
        ));
    }
}
