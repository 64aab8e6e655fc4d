//! Server shared state.

use std::sync::Arc;

use crate::config::Config;
use crate::countries::CountriesClient;
use crate::error_handling::InitializationError;
use crate::initialization::{init_countries_client, init_relay_client};
use crate::relay::ImageRelay;

/// State shared by every handler.
///
/// Holds no mutable data: both components are request-scoped and every
/// request may run in parallel with any other.
#[derive(Debug, Clone)]
pub struct AppState {
    /// REST Countries client
    pub countries: CountriesClient,
    /// Flag image relay
    pub relay: ImageRelay,
    /// Public origin used in sitemap entries
    pub site_url: Arc<str>,
}

impl AppState {
    /// Builds both HTTP clients from the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if a client cannot be
    /// built, or `InitializationError::InvalidBaseUrl` if the countries API URL
    /// does not parse.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let countries = CountriesClient::new(
            init_countries_client(config)?,
            &config.countries_api_url,
        )?
        .with_popular_count(config.popular_count);
        let relay = ImageRelay::new(
            init_relay_client(config)?,
            config.relay_timeout,
            config.block_private_hosts,
        );
        Ok(Self {
            countries,
            relay,
            site_url: Arc::from(config.site_url.as_str()),
        })
    }
}
