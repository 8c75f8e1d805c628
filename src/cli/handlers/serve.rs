//! Serve command handler

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::Server;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Runs the HTTP server until a shutdown signal arrives.
    pub async fn run(self) -> anyhow::Result<()> {
        Server::new(self.config).run().await
    }

    /// Validates configuration and reports what would be served.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        println!(
            "✓ Database pool: {}..{} connections, auto-migrate {}",
            self.config.database.min_connections,
            self.config.database.max_connections,
            if self.config.database.auto_migrate { "on" } else { "off" }
        );
        println!(
            "✓ Page sizes: owner {}, admin {}, public {} (max {})",
            self.config.listing.owner_page_size,
            self.config.listing.admin_page_size,
            self.config.listing.public_page_size,
            self.config.listing.max_page_size
        );
        println!("Dry run completed successfully");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}
