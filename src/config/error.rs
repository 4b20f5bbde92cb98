//! Configuration error types

use thiserror::Error;

/// Everything that can go wrong while loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `default.toml` or an explicit `--config` file is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// A file parsed but did not fit `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A loaded value broke a validation rule
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted path of the offending key, e.g. `server.port`
        field: String,
        message: String,
    },

    /// `database.engine` names a store this build cannot open
    #[error("Unsupported database engine '{engine}'. Allowed engines are: {}", .allowed.join(", "))]
    UnsupportedEngine {
        engine: String,
        allowed: &'static [&'static str],
    },

    /// `STAFF_APP_ENV` is not a known environment
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Both a config directory and a single config file were requested
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found(path: impl Into<String>) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity(message: impl Into<String>) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }

    /// Dotted key the error is about, when it concerns a single setting.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::ValidationError { field, .. } => Some(field),
            ConfigError::UnsupportedEngine { .. } => Some("database.engine"),
            _ => None,
        }
    }
}
