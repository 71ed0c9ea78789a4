//! Configuration for the Temporal MCP server.
//!
//! A configuration is resolved once from layered sources:
//! 1. **Inline** - `TEMPORAL_MCP_CONFIG` holds the whole YAML body
//! 2. **File** - `TEMPORAL_MCP_CONFIG_FILE`, else the caller's default path
//! 3. **Overrides** - per-field environment variables, then built-in defaults
//!
//! ## Environment Variables
//! - `TEMPORAL_HOST_PORT` - Temporal frontend address (default: `localhost:7233`)
//! - `TEMPORAL_NAMESPACE` - Namespace (default: `default`)
//! - `TEMPORAL_ENVIRONMENT` - Environment tag, lower-cased (default: `local`)
//! - `TEMPORAL_TIMEOUT` - Connection timeout (default: `5s`)
//! - `TEMPORAL_DEFAULT_TASK_QUEUE` - Default task queue (no default)
//!
//! Empty environment values are treated as unset.

pub mod duration;
pub mod env;
mod loader;
mod types;
pub mod watcher;

pub use env::{Env, ProcessEnv};
pub use loader::{ConfigLoader, ConfigSource, apply_env_overrides, load_config};
pub use types::*;
