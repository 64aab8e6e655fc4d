//! Logger setup for the server binary.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Installs the global `env_logger`.
///
/// `RUST_LOG` directives are read first; `level` is then applied as the
/// global floor and to this crate, while HTTP plumbing stays at info.
/// Colors are only emitted when stderr is a terminal.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=countries_dashboard=debug,reqwest=info countries_dashboard
///
/// # One JSON object per line, for log shippers
/// countries_dashboard --log-format json
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    // RUST_LOG first, then the CLI level on top
    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("wiremock", LevelFilter::Warn);
    builder.filter_module("countries_dashboard", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(
                        chrono::Utc::now().timestamp_millis(),
                        record.level(),
                        record.target(),
                        &record.args().to_string(),
                    )
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let (emoji, colored_level) = match level {
                    log::Level::Error => ("❌", level.to_string().red()),
                    log::Level::Warn => ("⚠️", level.to_string().yellow()),
                    log::Level::Info => ("✔️", level.to_string().green()),
                    log::Level::Debug => ("🔍", level.to_string().blue()),
                    log::Level::Trace => ("🔬", level.to_string().purple()),
                };

                writeln!(
                    buf,
                    "{} {} {} [{}] {}",
                    emoji,
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    record.target().cyan(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init() so a second initialization (tests) is an error, not a panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Formats one structured log line: `{"ts","level","target","msg"}`.
fn json_line(ts_millis: i64, level: log::Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "target": target,
        "msg": msg,
    })
    .to_string()
}
