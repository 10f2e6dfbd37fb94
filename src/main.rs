use std::path::PathBuf;
use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::info;

mod album;
mod config;
mod constants;
mod input;
mod kiosk;
mod page;
mod pager;
mod slide;
mod state;
mod texture_loader;

use crate::config::AlbumConfig;
use crate::constants::*;
use crate::kiosk::{KioskWindow, WindowOptions};

/// Full-screen kiosk showing three swipeable photo albums side by side
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Album configuration file, created with defaults when missing
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Run in a resizable window instead of full-screen
    #[arg(long)]
    windowed: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("album_kiosk={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level)?;

    let (config, source) = AlbumConfig::load_or_init(&args.config);
    info!(path = %args.config.display(), ?source, "configuration loaded");

    let mut window = KioskWindow::open(&WindowOptions { fullscreen: !args.windowed })?;
    window.configure(&config);
    window.run();

    Ok(())
}
