//! `GET /countries/popular` endpoint.

use axum::extract::State;
use axum::Json;

use crate::countries::Country;
use crate::server::AppState;

/// Serves the most populous countries as JSON, as many as the configured
/// popular count.
///
/// Upstream failures yield an empty array with status 200.
pub async fn popular_handler(State(state): State<AppState>) -> Json<Vec<Country>> {
    Json(state.countries.fetch_popular_countries().await)
}
