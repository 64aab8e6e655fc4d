//! Country data normalizer.
//!
//! Fetches raw country records from REST Countries, validates them against a
//! strict schema and maps them into the flat [`Country`] model. Batch
//! operations tolerate malformed records by dropping them instead of failing
//! the whole call.
//!
//! - [`models`]: raw upstream shape and normalized shape
//! - [`schema`]: per-record parsing and batch recovery
//! - [`select`]: pure selections (popular, code lookup, borders, search)
//! - [`CountriesClient`]: the three upstream operations

mod client;
pub mod models;
pub mod schema;
pub mod select;


pub use client::CountriesClient;
pub use models::{Country, Currency, Flags, Language};
pub use schema::{normalize, parse_batch, parse_record};
pub use select::{border_countries, find_by_code, search_by_name, select_popular};
