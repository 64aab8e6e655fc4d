//! Timed image fetch.
//!
//! One attempt per request. The whole exchange (send + body read) runs under
//! `tokio::time::timeout`; when it expires the future is dropped, which aborts
//! the in-flight request.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::config::{FALLBACK_IMAGE_CONTENT_TYPE, IMMUTABLE_CACHE_CONTROL};
use crate::error_handling::RelayError;

/// Image bytes fetched from upstream, ready to be re-served.
#[derive(Debug, Clone)]
pub struct RelayedImage {
    /// Upstream `Content-Type`, or `image/png` when absent
    pub content_type: String,
    /// Raw, unmodified body (never empty)
    pub bytes: Bytes,
}

impl IntoResponse for RelayedImage {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [
                (CONTENT_TYPE, self.content_type),
                (CACHE_CONTROL, IMMUTABLE_CACHE_CONTROL.to_string()),
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*".to_string()),
            ],
            self.bytes,
        )
            .into_response()
    }
}

/// Fetches `url` once, bounded by `timeout`.
///
/// # Errors
///
/// - `Timeout` if the bound expires (or the client's own timeout fires)
/// - `Upstream` if the upstream status is not 2xx
/// - `EmptyPayload` if the upstream body is zero bytes
/// - `Network` for any other transport failure
pub async fn fetch_image(
    client: &reqwest::Client,
    url: Url,
    timeout: Duration,
) -> Result<RelayedImage, RelayError> {
    match tokio::time::timeout(timeout, fetch_once(client, url)).await {
        Ok(result) => result,
        Err(_) => Err(RelayError::Timeout),
    }
}

async fn fetch_once(client: &reqwest::Client, url: Url) -> Result<RelayedImage, RelayError> {
    let response = client.get(url).send().await.map_err(transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(RelayError::Upstream {
            status: status.as_u16(),
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or(FALLBACK_IMAGE_CONTENT_TYPE)
        .to_string();

    let bytes = response.bytes().await.map_err(transport_error)?;
    if bytes.is_empty() {
        return Err(RelayError::EmptyPayload);
    }

    Ok(RelayedImage {
        content_type,
        bytes,
    })
}

fn transport_error(error: reqwest::Error) -> RelayError {
    if error.is_timeout() {
        return RelayError::Timeout;
    }
    RelayError::Network(error_chain(&error))
}

/// Joins an error and its sources into one line.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
