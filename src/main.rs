//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `countries_dashboard` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use countries_dashboard::initialization::init_logger_with;
use countries_dashboard::{serve, Config, Opt};

#[tokio::main]
async fn main() -> Result<()> {
    // Current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::from(Opt::parse());

    init_logger_with(config.log_level.into(), config.log_format)
        .context("Failed to initialize logger")?;

    if let Err(e) = config.validate() {
        eprintln!("countries_dashboard error: invalid configuration: {}", e);
        process::exit(2);
    }

    if let Err(e) = serve(&config).await {
        eprintln!("countries_dashboard error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
