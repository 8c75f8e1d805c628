//! Migrate command handler

use crate::config::Settings;
use crate::db;
use crate::error::AppResult;

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Applies pending migrations, lists them (`dry_run`) or reverts the
    /// last `rollback` ones.
    pub async fn execute(&self, dry_run: bool, rollback: Option<usize>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply them");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = db::revert_migrations(url, steps).await?;
            tracing::info!(count = reverted.len(), "Migrations reverted");
            println!("✓ Rolled back {} migration(s):", reverted.len());
            for version in &reverted {
                println!("  - {}", version);
            }
            return Ok(());
        }

        let applied = db::run_pending_migrations(url).await?;
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_invalid_database_url_rejected_before_connecting() {
        let mut config = Settings::default();
        config.database.url = "mysql://localhost/hotels".to_string();

        let result = MigrateCommandHandler::new(config).execute(true, None).await;
        assert!(matches!(result, Err(AppError::Configuration { .. })));
    }

    #[tokio::test]
    async fn test_zero_rollback_steps() {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/hotels".to_string();

        let result = MigrateCommandHandler::new(config).execute(false, Some(0)).await;
        match result {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "rollback_steps"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
