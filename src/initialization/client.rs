//! HTTP client initialization.
//!
//! The countries API and the image relay use separate clients: they differ in
//! default headers and timeout handling. Both identify themselves with the
//! configured User-Agent.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::ClientBuilder;

use crate::config::Config;

/// Initializes the HTTP client used for REST Countries calls.
///
/// Creates a `reqwest::Client` configured with:
/// - `Accept: application/json`
/// - The configured User-Agent
/// - The configured countries timeout, applied to every request
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_countries_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    ClientBuilder::new()
        .default_headers(headers)
        .user_agent(config.user_agent.clone())
        .timeout(config.countries_timeout)
        .build()
}

/// Initializes the HTTP client used for relayed image fetches.
///
/// Carries the configured User-Agent. The relay bounds each fetch itself, so no
/// client-wide timeout is set here; connection setup is capped at the same
/// duration.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_relay_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .user_agent(config.user_agent.clone())
        .connect_timeout(config.relay_timeout)
        .build()
}
