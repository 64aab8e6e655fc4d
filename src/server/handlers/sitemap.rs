//! `GET /sitemap.xml` endpoint.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::server::AppState;
use crate::sitemap::render_sitemap;

/// Serves the sitemap.
///
/// A failed country fetch is logged and the sitemap is served with the root
/// entry only.
pub async fn sitemap_handler(State(state): State<AppState>) -> Response {
    let countries = match state.countries.fetch_all_countries().await {
        Ok(countries) => countries,
        Err(e) => {
            log::warn!(
                "Serving sitemap without country entries [{}]: {}",
                e.error_type(),
                e
            );
            Vec::new()
        }
    };

    let xml = render_sitemap(&state.site_url, &countries);
    (StatusCode::OK, [(CONTENT_TYPE, "application/xml")], xml).into_response()
}
