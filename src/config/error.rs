//! Errors raised while assembling [`Settings`](crate::config::Settings).

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required layer (`default.toml` or an explicit `--config` file) is missing.
    #[error("Required configuration file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value is out of range or inconsistent.
    #[error("Invalid value for {field}: {message}")]
    ValidationError { field: String, message: String },

    /// `HOTEL_CONFIG_DIR` and `HOTEL_CONFIG_FILE` were both set.
    #[error("Conflicting configuration sources: {0}")]
    ConflictingSources(String),

    #[error("Unknown environment '{0}', expected one of: development, test, staging, production")]
    UnknownEnvironment(String),

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::FileNotFound { path: path.into() }
    }

    /// Dotted key of the offending setting, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            _ => None,
        }
    }
}
