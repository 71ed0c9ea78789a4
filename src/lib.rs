//! Temporal MCP configuration library
//!
//! Resolves connection settings and workflow definitions for a Temporal
//! workflow MCP server from inline YAML, a config file and environment overrides.

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
