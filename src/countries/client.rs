//! REST Countries client.
//!
//! Each operation is a single request-response round trip. The only timeout is
//! the one configured on the underlying `reqwest::Client`; there is no retry
//! and no cache at this layer.

use log::{debug, error, info, warn};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use super::models::Country;
use super::schema::parse_batch;
use super::select::select_popular;
use crate::config::{COUNTRY_FIELDS, POPULAR_COUNTRY_COUNT};
use crate::error_handling::CountriesError;

/// Fetches and normalizes country data from a REST Countries deployment.
///
/// Cloning is cheap: the inner `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct CountriesClient {
    http: reqwest::Client,
    base_url: Url,
    popular_count: usize,
}

impl CountriesClient {
    /// Creates a client for the API rooted at `base_url`
    /// (e.g. `https://restcountries.com/v3.1`).
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` does not parse.
    pub fn new(http: reqwest::Client, base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            popular_count: POPULAR_COUNTRY_COUNT,
        })
    }

    /// Sets how many countries [`fetch_popular_countries`](Self::fetch_popular_countries)
    /// returns (defaults to 8).
    pub fn with_popular_count(mut self, count: usize) -> Self {
        self.popular_count = count;
        self
    }

    /// Number of countries in the popular selection.
    pub fn popular_count(&self) -> usize {
        self.popular_count
    }

    /// Fetches every country, keeping the ones that pass validation.
    ///
    /// # Errors
    ///
    /// - `InvalidResponseFormat` if the payload is not a JSON array
    /// - `UpstreamStatus` on a non-success status
    /// - `Transport` on connection failure or timeout
    pub async fn fetch_all_countries(&self) -> Result<Vec<Country>, CountriesError> {
        let mut url = self.endpoint(&["all"]);
        url.query_pairs_mut().append_pair("fields", COUNTRY_FIELDS);

        let (status, payload) = self.get_json(url.clone()).await?;
        if !status.is_success() {
            return Err(upstream_status(status, &url));
        }

        let countries = parse_batch(&payload?)?;
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    /// Fetches the best match for a common or official country name.
    ///
    /// The upstream relevance order is trusted: the first valid record wins.
    ///
    /// # Errors
    ///
    /// - `NotFound(name)` when the upstream has no match (empty array or 404)
    ///   or no matching record passes validation
    /// - `InvalidResponseFormat`, `UpstreamStatus`, `Transport` as for
    ///   [`fetch_all_countries`](Self::fetch_all_countries)
    pub async fn fetch_country_by_name(&self, name: &str) -> Result<Country, CountriesError> {
        let url = self.endpoint(&["name", name]);

        let (status, payload) = self.get_json(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            warn!("No country found with name: {}", name);
            return Err(CountriesError::NotFound(name.to_string()));
        }
        if !status.is_success() {
            return Err(upstream_status(status, &url));
        }

        parse_batch(&payload?)?.into_iter().next().ok_or_else(|| {
            warn!("No country found with name: {}", name);
            CountriesError::NotFound(name.to_string())
        })
    }

    /// Fetches the countries of one continent (REST Countries "region").
    ///
    /// The continent is lower-cased into the path. Unknown continents are an
    /// empty success, whether the upstream answers `[]` or 404. Callers are
    /// expected to skip the call for an empty continent.
    ///
    /// # Errors
    ///
    /// Same as [`fetch_all_countries`](Self::fetch_all_countries).
    pub async fn fetch_countries_by_continent(
        &self,
        continent: &str,
    ) -> Result<Vec<Country>, CountriesError> {
        let url = self.endpoint(&["region", &continent.to_lowercase()]);

        let (status, payload) = self.get_json(url.clone()).await?;
        if status == StatusCode::NOT_FOUND {
            info!("No countries found in {}", continent);
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(upstream_status(status, &url));
        }

        let countries = parse_batch(&payload?)?;
        info!("Found {} countries in {}", countries.len(), continent);
        Ok(countries)
    }

    /// Fetches every country and returns the most populous ones, as many as
    /// the configured popular count.
    ///
    /// Never fails: any fetch error is logged and yields an empty list, so
    /// pre-rendering can proceed without seed data.
    pub async fn fetch_popular_countries(&self) -> Vec<Country> {
        match self.fetch_all_countries().await {
            Ok(countries) => {
                let popular = select_popular(&countries, self.popular_count);
                debug!("Selected {} popular countries", popular.len());
                popular
            }
            Err(e) => {
                error!("Error fetching popular countries [{}]: {}", e.error_type(), e);
                Vec::new()
            }
        }
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Sends a GET and reads the body as JSON.
    ///
    /// Transport failures are returned as the outer error. The status is
    /// returned alongside the parse result so callers can act on it before
    /// deciding whether an unparseable body matters.
    async fn get_json(
        &self,
        url: Url,
    ) -> Result<(StatusCode, Result<Value, CountriesError>), CountriesError> {
        debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            let e = CountriesError::Transport(e);
            error!("API call failed: {} [{}]: {}", url, e.error_type(), e);
            e
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            let e = CountriesError::Transport(e);
            error!("API call failed: {} [{}]: {}", url, e.error_type(), e);
            e
        })?;

        if status.is_success() {
            debug!("API call success: {} (Status: {})", url, status.as_u16());
        } else {
            error!("API call failed: {} (Status: {})", url, status.as_u16());
        }

        let payload = serde_json::from_slice::<Value>(&body).map_err(|e| {
            CountriesError::InvalidResponseFormat(format!("non-JSON body ({})", e))
        });
        Ok((status, payload))
    }
}

fn upstream_status(status: StatusCode, url: &Url) -> CountriesError {
    CountriesError::UpstreamStatus {
        status: status.as_u16(),
        url: url.to_string(),
    }
}
