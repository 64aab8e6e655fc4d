//! HTTP server.
//!
//! Provides two endpoints:
//! - `/flags?url=...` - Same-origin relay for remote flag images
//! - `/sitemap.xml` - Sitemap of the site root and every country page
//! - `/countries/popular` - JSON seed list of the most populous countries
//!
//! The server runs until Ctrl+C or SIGTERM, then drains in-flight requests.

mod handlers;
mod types;

use std::future::Future;

use anyhow::Context;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

use crate::config::Config;

pub use handlers::{flags_handler, popular_handler, sitemap_handler};
pub use types::AppState;

/// Builds the router over the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/flags", get(flags_handler))
        .route("/sitemap.xml", get(sitemap_handler))
        .route("/countries/popular", get(popular_handler))
        .with_state(state)
}

/// Builds the state from `config`, binds, and serves until a shutdown signal.
///
/// # Errors
///
/// Returns an error if a client cannot be built, the address cannot be bound,
/// or the server fails.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = AppState::from_config(config).context("Failed to initialize HTTP clients")?;

    let address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind server to {}", address))?;

    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    state: AppState,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener
        .local_addr()
        .context("Failed to read listener address")?;
    log::info!("Server listening on http://{}/", local);
    log::info!("  - Flags relay: http://{}/flags?url=<image url>", local);
    log::info!("  - Sitemap: http://{}/sitemap.xml", local);
    log::info!("  - Popular countries: http://{}/countries/popular", local);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    log::info!("Server shut down");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                log::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                log::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
