//! Configuration loader with layered source selection.
//!
//! Resolution is a single pass:
//! 1. Pick a source: inline `TEMPORAL_MCP_CONFIG`, else the file at
//!    `TEMPORAL_MCP_CONFIG_FILE` or the caller's default path.
//! 2. Parse the YAML body, if any.
//! 3. Apply environment overrides and defaults to the connection block.
//! 4. Validate that `hostPort` is set.

use super::env::{
    CONFIG_FILE_PATH, CONFIG_INLINE, DEFAULT_TASK_QUEUE_OVERRIDE, ENVIRONMENT_OVERRIDE, Env,
    HOST_PORT_OVERRIDE, NAMESPACE_OVERRIDE, ProcessEnv, TIMEOUT_OVERRIDE,
};
use super::types::{
    Configuration, DEFAULT_ENVIRONMENT, DEFAULT_HOST_PORT, DEFAULT_NAMESPACE, DEFAULT_TIMEOUT,
};
use crate::error::{ConfigError, ConfigResult};
use serde_yaml::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where a resolved configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The `TEMPORAL_MCP_CONFIG` environment variable.
    Inline,
    /// A config file that was read successfully.
    File(PathBuf),
    /// The config file did not exist; defaults and overrides only.
    Missing(PathBuf),
}

impl ConfigSource {
    /// The file path involved, if the source was file-based.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Inline => None,
            ConfigSource::File(path) | ConfigSource::Missing(path) => Some(path),
        }
    }
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Inline => write!(f, "inline ({})", CONFIG_INLINE),
            ConfigSource::File(path) => write!(f, "file {}", path.display()),
            ConfigSource::Missing(path) => write!(f, "defaults (no file at {})", path.display()),
        }
    }
}

/// A resolved configuration together with the source it was read from.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: Configuration,
    source: ConfigSource,
}

impl ConfigLoader {
    /// Resolve configuration using the process environment.
    pub fn load(default_path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load_with_env(default_path, &ProcessEnv)
    }

    /// Resolve configuration using an explicit environment lookup.
    pub fn load_with_env<E: Env + ?Sized>(
        default_path: impl AsRef<Path>,
        env: &E,
    ) -> ConfigResult<Self> {
        let (payload, source) = select_source(default_path.as_ref(), env)?;

        let mut config = match payload {
            Some(bytes) if !bytes.is_empty() => parse_config(&bytes)?,
            _ => Configuration::empty(),
        };

        apply_env_overrides(&mut config, env);
        validate(&config)?;

        info!(
            source = %source,
            host_port = %config.connection.host_port,
            namespace = %config.connection.namespace,
            workflows = config.workflows.len(),
            "Configuration resolved"
        );

        Ok(Self { config, source })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Configuration {
        self.config
    }

    /// Get the source the configuration was read from.
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }
}

/// Resolve configuration from `default_path` and the process environment.
pub fn load_config(default_path: impl AsRef<Path>) -> ConfigResult<Configuration> {
    ConfigLoader::load(default_path).map(ConfigLoader::into_config)
}

/// Pick the raw payload. `None` means no configuration was supplied.
fn select_source<E: Env + ?Sized>(
    default_path: &Path,
    env: &E,
) -> ConfigResult<(Option<Vec<u8>>, ConfigSource)> {
    if let Some(body) = env.non_empty(CONFIG_INLINE) {
        debug!("Using inline configuration from {}", CONFIG_INLINE);
        return Ok((Some(body.into_bytes()), ConfigSource::Inline));
    }

    let path = match env.non_empty(CONFIG_FILE_PATH) {
        Some(explicit) => {
            debug!("Config path overridden by {}: {}", CONFIG_FILE_PATH, explicit);
            PathBuf::from(explicit)
        }
        None => default_path.to_path_buf(),
    };

    // Inline config is known to be unset here, so a missing file is not an error.
    match std::fs::read(&path) {
        Ok(bytes) => {
            debug!("Read config file {} ({} bytes)", path.display(), bytes.len());
            Ok((Some(bytes), ConfigSource::File(path)))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "No config file at {}, using defaults and environment",
                path.display()
            );
            Ok((None, ConfigSource::Missing(path)))
        }
        Err(source) => Err(ConfigError::Read { path, source }),
    }
}

/// Parse a non-empty YAML body. A document with no content yields the empty configuration.
///
/// The typed decode runs on the raw bytes rather than on the intermediate
/// [`Value`], so string fields see each scalar's source text.
fn parse_config(bytes: &[u8]) -> ConfigResult<Configuration> {
    let value: Value = serde_yaml::from_slice(bytes).map_err(ConfigError::Parse)?;
    if value.is_null() {
        return Ok(Configuration::empty());
    }
    serde_yaml::from_slice(bytes).map_err(ConfigError::Parse)
}

/// Apply environment overrides and defaults to the connection block.
///
/// For each field: a non-empty environment value wins, then any value already
/// present, then the built-in default. `defaultTaskQueue` has no default.
pub fn apply_env_overrides<E: Env + ?Sized>(config: &mut Configuration, env: &E) {
    let conn = &mut config.connection;

    resolve_field(
        &mut conn.host_port,
        HOST_PORT_OVERRIDE,
        env.non_empty(HOST_PORT_OVERRIDE),
        Some(DEFAULT_HOST_PORT),
    );
    resolve_field(
        &mut conn.namespace,
        NAMESPACE_OVERRIDE,
        env.non_empty(NAMESPACE_OVERRIDE),
        Some(DEFAULT_NAMESPACE),
    );
    // Only the override is lower-cased; a value from the file is kept as written.
    resolve_field(
        &mut conn.environment,
        ENVIRONMENT_OVERRIDE,
        env.non_empty(ENVIRONMENT_OVERRIDE).map(|v| v.to_lowercase()),
        Some(DEFAULT_ENVIRONMENT),
    );
    resolve_field(
        &mut conn.timeout,
        TIMEOUT_OVERRIDE,
        env.non_empty(TIMEOUT_OVERRIDE),
        Some(DEFAULT_TIMEOUT),
    );
    resolve_field(
        &mut conn.default_task_queue,
        DEFAULT_TASK_QUEUE_OVERRIDE,
        env.non_empty(DEFAULT_TASK_QUEUE_OVERRIDE),
        None,
    );
}

fn resolve_field(
    field: &mut String,
    env_var: &str,
    override_value: Option<String>,
    default: Option<&str>,
) {
    if let Some(value) = override_value {
        debug!(env_var, value = %value, "Applying environment override");
        *field = value;
    } else if field.is_empty()
        && let Some(default) = default
    {
        *field = default.to_string();
    }
}

fn validate(config: &Configuration) -> ConfigResult<()> {
    if config.connection.host_port.is_empty() {
        return Err(ConfigError::MissingRequiredField {
            field: "hostPort",
            env_var: HOST_PORT_OVERRIDE,
        });
    }
    Ok(())
}
