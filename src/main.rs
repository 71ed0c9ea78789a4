//! Temporal MCP configuration tool
//!
//! Resolves the server configuration the same way the MCP server does at
//! startup and prints it, checks it, or follows changes to the config file.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use temporal_mcp_config::cli::{CheckFormat, Cli, Command, ShowFormat};
use temporal_mcp_config::config::watcher::{
    ConfigChangeEvent, SharedConfig, WatcherConfig, start_config_watcher,
};
use temporal_mcp_config::config::{ConfigLoader, ProcessEnv};
use temporal_mcp_config::error::{ConfigError, ErrorReport};
use temporal_mcp_config::format::{OutputFormat, format_configuration, format_workflow_list};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    match cli.command {
        Some(Command::Show { format }) => run_show(&cli.config, format)?,
        None => run_show(&cli.config, ShowFormat::default())?,
        Some(Command::Check { format }) => run_check(&cli.config, format)?,
        Some(Command::Workflows) => {
            let config = ConfigLoader::load(&cli.config)?.into_config();
            print!("{}", format_workflow_list(&config));
        }
        Some(Command::Watch { debounce_ms }) => {
            run_watch(&cli.config, Duration::from_millis(debounce_ms)).await?
        }
    }

    Ok(())
}

fn run_show(config_path: &str, format: ShowFormat) -> Result<()> {
    let config = ConfigLoader::load(config_path)?.into_config();
    let rendered = format_configuration(&config, OutputFormat::from(format))?;
    print!("{}", rendered);
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Resolve and also verify the timeout parses, since the server will need it.
fn check(config_path: &str) -> Result<ConfigLoader, ConfigError> {
    let loader = ConfigLoader::load(config_path)?;
    loader.config().connection.timeout_duration()?;
    Ok(loader)
}

fn run_check(config_path: &str, format: CheckFormat) -> Result<()> {
    match (check(config_path), format) {
        (Ok(loader), CheckFormat::Text) => {
            let config = loader.config();
            println!(
                "OK: {} ({} @ {}, {} workflows)",
                loader.source(),
                config.connection.namespace,
                config.connection.host_port,
                config.workflows.len()
            );
            Ok(())
        }
        (Ok(loader), CheckFormat::Json) => {
            let config = loader.config();
            let report = serde_json::json!({
                "ok": true,
                "source": loader.source().to_string(),
                "hostPort": config.connection.host_port,
                "namespace": config.connection.namespace,
                "workflows": config.workflow_names(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        (Err(e), CheckFormat::Text) => Err(e.into()),
        (Err(e), CheckFormat::Json) => {
            println!("{}", serde_json::to_string_pretty(&ErrorReport::from(&e))?);
            std::process::exit(1);
        }
    }
}

async fn run_watch(config_path: &str, debounce: Duration) -> Result<()> {
    let loader = ConfigLoader::load(config_path)?;
    let shared = Arc::new(SharedConfig::new(loader.config().clone()));
    print!("{}", loader.config().to_yaml()?);

    let watcher_config = WatcherConfig {
        debounce_duration: debounce,
    };
    let Some(mut handle) = start_config_watcher(
        &loader,
        PathBuf::from(config_path),
        ProcessEnv,
        Arc::clone(&shared),
        watcher_config,
    )?
    else {
        info!("Nothing to watch, exiting");
        return Ok(());
    };

    loop {
        tokio::select! {
            event = handle.wait_for_change() => match event {
                Some(ConfigChangeEvent::Reloaded(config)) => {
                    println!("---");
                    print!("{}", config.to_yaml()?);
                }
                Some(ConfigChangeEvent::ReloadFailed(message)) => {
                    eprintln!("Reload failed, keeping previous configuration: {}", message);
                }
                Some(ConfigChangeEvent::Error(message)) => {
                    warn!("Config watcher error: {}", message);
                }
                None => return Ok(()),
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, stopping watch");
                return Ok(());
            }
        }
    }
}
