//! Environment variable lookup.
//!
//! The loader never reads `std::env` directly; it is handed an [`Env`] so tests
//! can supply a fixed map instead of mutating the process environment.

use std::collections::HashMap;

/// Inline YAML configuration body. Takes precedence over any file.
pub const CONFIG_INLINE: &str = "TEMPORAL_MCP_CONFIG";
/// Path of the config file, overriding the caller's default path.
pub const CONFIG_FILE_PATH: &str = "TEMPORAL_MCP_CONFIG_FILE";
pub const HOST_PORT_OVERRIDE: &str = "TEMPORAL_HOST_PORT";
pub const NAMESPACE_OVERRIDE: &str = "TEMPORAL_NAMESPACE";
/// Lower-cased before use.
pub const ENVIRONMENT_OVERRIDE: &str = "TEMPORAL_ENVIRONMENT";
pub const TIMEOUT_OVERRIDE: &str = "TEMPORAL_TIMEOUT";
pub const DEFAULT_TASK_QUEUE_OVERRIDE: &str = "TEMPORAL_DEFAULT_TASK_QUEUE";

/// Read-only key/value lookup.
pub trait Env {
    /// Raw value of `key`, or `None` if unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Value of `key` if it is set to something non-empty.
    fn non_empty(&self, key: &str) -> Option<String> {
        self.var(key).filter(|v| !v.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Env for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl Env for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl Env for HashMap<&str, &str> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).map(|v| v.to_string())
    }
}

impl<E: Env + ?Sized> Env for &E {
    fn var(&self, key: &str) -> Option<String> {
        (**self).var(key)
    }
}
