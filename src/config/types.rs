//! Configuration types and structures.
//!
//! The on-disk shape is a YAML mapping with a `temporal` connection block and a
//! `workflows` map. Every field is optional; missing or null values decode to
//! their zero value and are filled in later by the loader's defaulting pass.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// Default Temporal frontend address.
pub const DEFAULT_HOST_PORT: &str = "localhost:7233";

/// Default Temporal namespace.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Default environment tag.
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Default connection timeout, as a duration string.
pub const DEFAULT_TIMEOUT: &str = "5s";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Settings for reaching the Temporal service.
    #[serde(
        rename = "temporal",
        alias = "connection",
        default,
        deserialize_with = "null_as_default"
    )]
    pub connection: Connection,

    /// Workflows exposed as tools, keyed by tool name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub workflows: HashMap<String, WorkflowDefinition>,
}

impl Configuration {
    /// The configuration used when nothing was supplied: no workflows and an
    /// all-empty connection block.
    pub fn empty() -> Self {
        Self {
            connection: Connection::default(),
            workflows: HashMap::new(),
        }
    }

    /// Look up a workflow definition by name.
    pub fn workflow(&self, name: &str) -> Option<&WorkflowDefinition> {
        self.workflows.get(name)
    }

    /// Workflow names in sorted order.
    pub fn workflow_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.workflows.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Serialize to the YAML body format accepted by the loader.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Serialize)
    }
}

/// Connection settings for the Temporal service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// `host:port` of the Temporal frontend.
    #[serde(alias = "address", default, deserialize_with = "lenient_string")]
    pub host_port: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub namespace: String,

    /// Environment tag. Lower-cased only when it comes from the environment.
    #[serde(default, deserialize_with = "lenient_string")]
    pub environment: String,

    /// Duration string such as `5s` or `1m30s`.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub timeout: String,

    /// Task queue used by workflows that do not name their own.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub default_task_queue: String,
}

impl Connection {
    /// Parse [`Connection::timeout`] into a [`Duration`].
    pub fn timeout_duration(&self) -> Result<Duration, ConfigError> {
        super::duration::parse_duration(&self.timeout).ok_or_else(|| {
            ConfigError::InvalidDuration {
                value: self.timeout.clone(),
            }
        })
    }
}

/// A Temporal workflow exposed as a tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    /// Free-text description of what the workflow does.
    #[serde(default, deserialize_with = "lenient_string")]
    pub purpose: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub input: ParameterSchema,

    #[serde(default, deserialize_with = "null_as_default")]
    pub output: ParameterSchema,

    #[serde(default, deserialize_with = "lenient_string")]
    pub task_queue: String,

    /// Template for deriving a workflow ID from the input.
    #[serde(rename = "workflowIDRecipe", default, deserialize_with = "lenient_string")]
    pub workflow_id_recipe: String,
}

/// Input or output schema of a workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    pub kind: String,

    /// Field descriptors, each a `name: type-or-description` mapping. Order is
    /// kept for documentation.
    #[serde(default, deserialize_with = "lenient_fields")]
    pub fields: Vec<BTreeMap<String, String>>,

    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
}

impl ParameterSchema {
    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields
            .iter()
            .flat_map(|field| field.keys().map(String::as_str))
            .collect()
    }
}

/// Decode an explicit null as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a YAML scalar as its source text; null becomes empty.
///
/// Plain scalars such as `True`, `1e3` or `0x10` are kept exactly as written.
/// Sequences and mappings are rejected.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode field descriptors with the same scalar rules as [`lenient_string`].
/// A null list entry becomes an empty descriptor so positions are preserved.
fn lenient_fields<'de, D>(deserializer: D) -> Result<Vec<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries: Option<Vec<Option<BTreeMap<String, Option<String>>>>> =
        Option::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            entry
                .unwrap_or_default()
                .into_iter()
                .map(|(name, desc)| (name, desc.unwrap_or_default()))
                .collect()
        })
        .collect())
}
