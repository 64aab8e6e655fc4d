//! Error handling.
//!
//! This module provides:
//! - Error type definitions for the data normalizer, image relay and startup
//! - Mapping of relay failures onto HTTP statuses and JSON bodies
//! - Categorization of transport errors for log output

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{
    CountriesError, ErrorBody, ErrorType, InitializationError, RecordError, RelayError,
};
