//! Runtime configuration.
//!
//! [`Config`] is what the library consumes; [`Opt`] is the clap front-end the
//! binary parses it from (flags, environment, `.env`).

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    COUNTRIES_TIMEOUT, DEFAULT_HOST, DEFAULT_PORT, POPULAR_COUNTRY_COUNT, RELAY_TIMEOUT,
    RELAY_USER_AGENT, REST_COUNTRIES_BASE_URL, SITE_BASE_URL,
};

/// Minimum severity that reaches the log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Rejected requests and dropped records
    Warn,
    /// Lifecycle and fetch summaries (default)
    Info,
    /// Every upstream call
    Debug,
    /// Everything, including dependencies that log at trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::Error,
            LogLevel::Warn => Self::Warn,
            LogLevel::Info => Self::Info,
            LogLevel::Debug => Self::Debug,
            LogLevel::Trace => Self::Trace,
        }
    }
}

/// How log lines are rendered on stderr.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Colored, one line per record, for terminals
    Plain,
    /// One JSON object per line, for log shippers
    Json,
}

/// Settings for the server and both components.
///
/// # Examples
///
/// ```
/// use countries_dashboard::Config;
/// use std::time::Duration;
///
/// let config = Config {
///     port: 8080,
///     relay_timeout: Duration::from_secs(5),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen address
    pub host: String,

    /// Listen port (0 picks an ephemeral port)
    pub port: u16,

    /// Base URL of the REST Countries API
    pub countries_api_url: String,

    /// Timeout applied by the countries client to every upstream call
    pub countries_timeout: Duration,

    /// Bounded wait for a single relayed image fetch
    pub relay_timeout: Duration,

    /// User-Agent sent with REST Countries calls and relayed image fetches
    pub user_agent: String,

    /// Public origin written into sitemap entries
    pub site_url: String,

    /// Number of countries returned by the popular selection
    pub popular_count: usize,

    /// Reject relay URLs pointing at localhost or private networks
    pub block_private_hosts: bool,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            countries_api_url: REST_COUNTRIES_BASE_URL.to_string(),
            countries_timeout: COUNTRIES_TIMEOUT,
            relay_timeout: RELAY_TIMEOUT,
            user_agent: RELAY_USER_AGENT.to_string(),
            site_url: SITE_BASE_URL.to_string(),
            popular_count: POPULAR_COUNTRY_COUNT,
            block_private_hosts: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid configuration for '{field}': {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is accepted
    pub message: String,
}

impl ConfigValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl Config {
    /// Checks the configuration for values the service cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.countries_timeout.is_zero() {
            return Err(ConfigValidationError::new(
                "countries_timeout",
                "must be greater than 0",
            ));
        }
        if self.relay_timeout.is_zero() {
            return Err(ConfigValidationError::new(
                "relay_timeout",
                "must be greater than 0",
            ));
        }
        if self.popular_count == 0 {
            return Err(ConfigValidationError::new(
                "popular_count",
                "must be greater than 0",
            ));
        }
        for (field, value) in [
            ("countries_api_url", &self.countries_api_url),
            ("site_url", &self.site_url),
        ] {
            match url::Url::parse(value) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
                Ok(parsed) => {
                    return Err(ConfigValidationError::new(
                        field,
                        format!(
                            "scheme '{}' is not supported (expected http:// or https://)",
                            parsed.scheme()
                        ),
                    ));
                }
                Err(e) => {
                    return Err(ConfigValidationError::new(
                        field,
                        format!("'{}' is not a valid URL: {}", value, e),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Command-line options.
///
/// Every flag can also be supplied through the environment (or a `.env` file).
///
/// ```bash
/// # Serve on port 8080 with a 5 second relay timeout
/// countries_dashboard --port 8080 --relay-timeout-seconds 5
///
/// # Refuse to relay images from private networks
/// countries_dashboard --block-private-hosts
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "countries_dashboard",
    about = "Serves the flag image relay and sitemap for the countries dashboard."
)]
pub struct Opt {
    /// Listen address
    #[arg(long, env = "COUNTRIES_DASHBOARD_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Listen port
    #[arg(long, env = "COUNTRIES_DASHBOARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// REST Countries API base URL
    #[arg(long, env = "COUNTRIES_API_URL", default_value = REST_COUNTRIES_BASE_URL)]
    pub countries_api_url: String,

    /// Timeout for REST Countries calls, in seconds
    #[arg(long, env = "COUNTRIES_TIMEOUT_SECONDS", default_value_t = COUNTRIES_TIMEOUT.as_secs())]
    pub countries_timeout_seconds: u64,

    /// Bounded wait for a relayed image fetch, in seconds
    #[arg(long, env = "RELAY_TIMEOUT_SECONDS", default_value_t = RELAY_TIMEOUT.as_secs())]
    pub relay_timeout_seconds: u64,

    /// User-Agent sent with REST Countries calls and relayed image fetches
    #[arg(long, env = "RELAY_USER_AGENT", default_value = RELAY_USER_AGENT)]
    pub user_agent: String,

    /// Public origin written into sitemap entries
    #[arg(long, env = "SITE_URL", default_value = SITE_BASE_URL)]
    pub site_url: String,

    /// Number of countries in the popular selection
    #[arg(long, env = "POPULAR_COUNT", default_value_t = POPULAR_COUNTRY_COUNT)]
    pub popular_count: usize,

    /// Reject relay URLs pointing at localhost or private networks
    #[arg(long, env = "BLOCK_PRIVATE_HOSTS")]
    pub block_private_hosts: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            host: opt.host,
            port: opt.port,
            countries_api_url: opt.countries_api_url,
            countries_timeout: Duration::from_secs(opt.countries_timeout_seconds),
            relay_timeout: Duration::from_secs(opt.relay_timeout_seconds),
            user_agent: opt.user_agent,
            site_url: opt.site_url,
            popular_count: opt.popular_count,
            block_private_hosts: opt.block_private_hosts,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}
