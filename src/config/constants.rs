//! Configuration constants.
//!
//! This module defines the defaults used throughout the application: upstream
//! endpoints, timeouts, relay headers and sitemap settings.

use std::time::Duration;

/// Base URL of the REST Countries API (v3.1).
pub const REST_COUNTRIES_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Field subset requested on the `/all` listing call.
///
/// The listing endpoint rejects unfiltered requests and the subset keeps the
/// payload small. Must cover every field read by the record schema.
pub const COUNTRY_FIELDS: &str =
    "name,capital,region,subregion,population,area,flags,cca2,cca3,currencies,languages,borders,continents";

/// Timeout for REST Countries calls.
pub const COUNTRIES_TIMEOUT: Duration = Duration::from_secs(15);

/// Bounded wait for a single relayed image fetch.
pub const RELAY_TIMEOUT: Duration = Duration::from_secs(10);

/// User-Agent sent with REST Countries calls and relayed image fetches.
pub const RELAY_USER_AGENT: &str = "Countries Dashboard/1.0";

/// Cache policy attached to every successfully relayed image (one year).
pub const IMMUTABLE_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Content type used when the upstream image response carries none.
pub const FALLBACK_IMAGE_CONTENT_TYPE: &str = "image/png";

/// Number of countries selected for pre-rendering.
pub const POPULAR_COUNTRY_COUNT: usize = 8;

/// Public origin of the dashboard, used for sitemap entries.
pub const SITE_BASE_URL: &str = "https://countries-dashboard.vercel.app";

/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 3000;

// Relay error bodies. These strings are part of the HTTP contract.

/// `url` query parameter absent or empty.
pub const MSG_MISSING_URL: &str = "Missing URL parameter";
/// Relay URL is not http(s).
pub const MSG_INVALID_PROTOCOL: &str = "Invalid URL protocol";
/// Relay URL points at a refused host.
pub const MSG_BLOCKED_HOST: &str = "Blocked URL host";
/// Upstream answered 2xx with no bytes.
pub const MSG_EMPTY_IMAGE: &str = "Empty image data received";
/// Bounded wait expired.
pub const MSG_TIMED_OUT: &str = "Request timed out";
/// Details attached to [`MSG_TIMED_OUT`].
pub const MSG_TIMED_OUT_DETAILS: &str = "Image fetch took too long";
/// Prefix for upstream status and network failures.
pub const MSG_FETCH_FAILED: &str = "Error fetching image";
