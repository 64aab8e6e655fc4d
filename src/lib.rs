//! countries_dashboard library: country data normalization and flag image relay
//!
//! This library provides the server-side core of the countries dashboard:
//! fetching and normalizing REST Countries records, selecting "popular"
//! countries, and re-serving remote flag images under this service's origin.
//!
//! # Example
//!
//! ```no_run
//! use countries_dashboard::{Config, CountriesClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let client = CountriesClient::new(reqwest::Client::new(), &config.countries_api_url)?
//!     .with_popular_count(config.popular_count);
//!
//! let france = client.fetch_country_by_name("france").await?;
//! println!("{} borders {:?}", france.name, france.borders);
//!
//! for country in client.fetch_popular_countries().await {
//!     println!("{} ({})", country.name, country.population);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
pub mod countries;
pub mod error_handling;
pub mod initialization;
pub mod relay;
pub mod server;
pub mod sitemap;

// Re-export public API
pub use config::{Config, ConfigValidationError, LogFormat, LogLevel, Opt};
pub use countries::{select_popular, CountriesClient, Country};
pub use error_handling::{CountriesError, InitializationError, RecordError, RelayError};
pub use relay::ImageRelay;
pub use server::{build_router, serve, serve_with_shutdown, AppState};
