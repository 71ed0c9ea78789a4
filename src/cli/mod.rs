//! CLI command definitions for temporal-mcp-config
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::format::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};

/// Default config file path handed to the loader.
pub const DEFAULT_CONFIG_PATH: &str = "config.yml";

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ShowFormat {
    #[default]
    #[value(alias = "yml")]
    Yaml,
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<ShowFormat> for OutputFormat {
    fn from(format: ShowFormat) -> Self {
        match format {
            ShowFormat::Yaml => OutputFormat::Yaml,
            ShowFormat::Json => OutputFormat::Json,
            ShowFormat::Markdown => OutputFormat::Markdown,
        }
    }
}

/// Output format for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CheckFormat {
    #[default]
    Text,
    Json,
}

/// Resolve and inspect Temporal MCP server configuration
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Default config file path (TEMPORAL_MCP_CONFIG_FILE takes precedence)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the resolved configuration (default if no subcommand given)
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ShowFormat::Yaml)]
        format: ShowFormat,
    },

    /// Resolve the configuration and report success or the error
    Check {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = CheckFormat::Text)]
        format: CheckFormat,
    },

    /// List configured workflows with their task queues
    Workflows,

    /// Resolve, then re-resolve and print whenever the config file changes
    Watch {
        /// Debounce window in milliseconds
        #[arg(long, default_value_t = 500)]
        debounce_ms: u64,
    },
}
