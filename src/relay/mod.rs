//! Flag image relay.
//!
//! Re-serves remote images under this service's origin with a long-lived,
//! immutable cache policy. Each request goes through
//! `Received -> Validated -> Fetching -> {Succeeded | UpstreamError | Empty |
//! TimedOut | NetworkError}`; every failure maps to one HTTP status and JSON
//! body (see [`RelayError`]). No retries are performed.

mod fetch;
mod validation;

use std::time::Duration;

use log::{debug, error, warn};

use crate::error_handling::RelayError;

pub use fetch::{fetch_image, RelayedImage};
pub use validation::validate_image_url;

/// Stateless relay: a shared HTTP client plus the per-request policy.
#[derive(Debug, Clone)]
pub struct ImageRelay {
    client: reqwest::Client,
    timeout: Duration,
    block_private_hosts: bool,
}

impl ImageRelay {
    /// Creates a relay.
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client carrying the relay User-Agent
    /// * `timeout` - Bounded wait for one fetch
    /// * `block_private_hosts` - Refuse localhost and private addresses
    pub fn new(client: reqwest::Client, timeout: Duration, block_private_hosts: bool) -> Self {
        Self {
            client,
            timeout,
            block_private_hosts,
        }
    }

    /// Validates `url` and fetches it once.
    ///
    /// # Errors
    ///
    /// Any [`RelayError`]; validation errors are returned before any network
    /// activity.
    pub async fn relay(&self, url: Option<&str>) -> Result<RelayedImage, RelayError> {
        let url = validate_image_url(url, self.block_private_hosts).map_err(|e| {
            warn!("Rejected relay request [{}]: {}", e.error_type(), e);
            e
        })?;

        debug!("Relaying image {}", url);
        let target = url.to_string();
        match fetch_image(&self.client, url, self.timeout).await {
            Ok(image) => {
                debug!(
                    "Relayed {} ({} bytes, {})",
                    target,
                    image.bytes.len(),
                    image.content_type
                );
                Ok(image)
            }
            Err(e) => {
                error!("Error fetching image {} [{}]: {}", target, e.error_type(), e);
                Err(e)
            }
        }
    }
}
