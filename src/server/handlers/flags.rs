//! `GET /flags?url=...` image relay endpoint.

use axum::extract::{RawQuery, State};
use axum::response::{IntoResponse, Response};
use url::form_urlencoded;

use crate::server::AppState;

/// Relays the image named by the `url` query parameter.
///
/// The query string is read leniently so that every malformed request still
/// gets the relay's JSON error body.
pub async fn flags_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let url = query.as_deref().and_then(url_param);
    match state.relay.relay(url.as_deref()).await {
        Ok(image) => image.into_response(),
        Err(e) => e.into_response(),
    }
}

/// First `url` value of a query string; later duplicates are ignored.
fn url_param(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "url")
        .map(|(_, value)| value.into_owned())
}
