//! cpustat: a scrolling stacked-bar chart of CPU time in the terminal.
//!
//! Run with:  `cpustat --all --wait 2s`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Display all stat categories (user, nice, system, idle, iowait, irq, steal)
    #[arg(long)]
    all: bool,

    /// Wait between samples (e.g. 5s, 500ms)
    #[arg(long, value_parser = humantime_serde::re::humantime::parse_duration)]
    wait: Option<Duration>,

    /// Width of one bar in columns
    #[arg(long)]
    bar_width: Option<u16>,

    /// Config file (default: $XDG_CONFIG_HOME/cpustat/cpustat.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(cpustat_config::default_path);
    let (mut config, origin) = cpustat_config::load(&config_path)
        .with_context(|| format!("failed to load config from '{}'", config_path.display()))?;

    // Command line wins over the config file.
    if args.all {
        config.general.detailed = true;
    }
    if let Some(wait) = args.wait {
        config.general.interval = wait;
    }
    if let Some(width) = args.bar_width {
        config.general.bar_width = width;
    }
    if let Some(file) = args.log_file.clone() {
        config.log.file = Some(file);
    }
    config.validate().context("invalid settings")?;

    init_logging(config.log.file.as_deref())?;

    tracing::info!("cpustat v{} starting", env!("CARGO_PKG_VERSION"));
    cpustat_config::report(&config_path, origin);
    tracing::debug!(config = %config_path.display(), ?config, "settings resolved");

    let settings = cpustat_terminal::Settings::from_config(&config);
    cpustat_terminal::run(settings).context("cpustat stopped")?;

    tracing::info!("cpustat exiting");
    Ok(())
}

/// Structured logging; RUST_LOG controls verbosity.  The chart owns the
/// screen, so logs go to `file` when given (default level: info), otherwise
/// to stderr (default level: warn).
fn init_logging(file: Option<&std::path::Path>) -> Result<()> {
    let filter = |default: &str| {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
    };

    match file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter("info"))
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("warn"))
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
