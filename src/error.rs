//! Structured error types for configuration resolution.

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ConfigReadError,
    ConfigParseError,
    MissingRequiredField,
    InvalidFieldValue,
    InternalError,
}

/// Errors produced while resolving or using a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The payload was non-empty but not a valid configuration body.
    #[error("failed to parse config YAML: {0}")]
    Parse(#[source] serde_yaml::Error),

    /// A required field is still empty after defaulting.
    #[error("temporal {field} is required (set via config or {env_var} env var)")]
    MissingRequiredField {
        field: &'static str,
        env_var: &'static str,
    },

    #[error("invalid duration: {value:?}")]
    InvalidDuration { value: String },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

impl ConfigError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ConfigError::Read { .. } => ErrorCode::ConfigReadError,
            ConfigError::Parse(_) => ErrorCode::ConfigParseError,
            ConfigError::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            ConfigError::InvalidDuration { .. } => ErrorCode::InvalidFieldValue,
            ConfigError::Serialize(_) => ErrorCode::InternalError,
        }
    }

    /// The config field this error concerns, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::MissingRequiredField { field, .. } => Some(*field),
            ConfigError::InvalidDuration { .. } => Some("timeout"),
            _ => None,
        }
    }
}

/// Serializable form of a [`ConfigError`] for machine-readable output.
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl From<&ConfigError> for ErrorReport {
    fn from(err: &ConfigError) -> Self {
        let path = match err {
            ConfigError::Read { path, .. } => Some(path.display().to_string()),
            _ => None,
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            field: err.field().map(str::to_string),
            path,
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
