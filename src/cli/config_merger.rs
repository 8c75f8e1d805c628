//! Merges CLI overrides into file/environment configuration.
//!
//! Precedence, lowest to highest: configuration files, `HOTEL_*` environment
//! variables, global CLI flags, subcommand flags.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration honouring `--config` and `--env`.
    ///
    /// Validation is deferred to [`merge_cli_args`](Self::merge_cli_args) so
    /// CLI flags can still correct file values.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Applies CLI overrides and validates what the selected command needs.
    ///
    /// `migrate` only needs the database and logger sections; serving needs
    /// everything, including a JWT secret.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        match &cli.command {
            Some(Commands::Serve {
                host,
                port,
                log_level,
                ..
            }) => {
                if let Some(host) = host {
                    config.server.host = host.clone();
                }
                if let Some(port) = port {
                    config.server.port = *port;
                }
                if let Some(level) = log_level {
                    config.logger.level = level.as_str().to_string();
                }
                config.validate()?;
            }
            Some(Commands::Migrate { .. }) => {
                config.database.validate()?;
                config.logger.validate()?;
            }
            None => config.validate()?,
        }

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}
