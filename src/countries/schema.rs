//! Record validation, normalization and batch recovery.
//!
//! Parsing follows a parse-don't-validate shape: a raw JSON value either becomes
//! a `Country` or a `RecordError`. Batches are parsed in one pass first; when
//! that fails, every record is parsed on its own and failures are dropped.

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::models::{Country, Currency, Flags, Language, RawCountry};
use crate::error_handling::{CountriesError, ErrorType, RecordError};

impl RawCountry {
    /// Checks the constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `RecordError::Constraint` naming the first offending field.
    pub fn validate(&self) -> Result<(), RecordError> {
        for (field, value) in [
            ("name.common", &self.name.common),
            ("region", &self.region),
            ("cca2", &self.cca2),
            ("cca3", &self.cca3),
        ] {
            if value.trim().is_empty() {
                return Err(RecordError::Constraint {
                    field,
                    problem: "must not be empty".to_string(),
                });
            }
        }

        for (field, value) in [("flags.png", &self.flags.png), ("flags.svg", &self.flags.svg)] {
            match Url::parse(value) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => {
                    return Err(RecordError::Constraint {
                        field,
                        problem: format!("has unsupported scheme '{}'", url.scheme()),
                    });
                }
                Err(e) => {
                    return Err(RecordError::Constraint {
                        field,
                        problem: format!("is not a valid URL ({})", e),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Maps a validated raw record onto the flat `Country` shape.
///
/// Empty optional strings, an empty capital list and a zero area are treated
/// as absent.
pub fn normalize(raw: RawCountry) -> Country {
    Country {
        name: raw.name.common,
        capital: raw.capital.and_then(|capitals| capitals.into_iter().next()),
        region: raw.region,
        subregion: raw.subregion.filter(|s| !s.is_empty()),
        population: raw.population,
        area: raw.area.filter(|a| *a > 0.0),
        flags: Flags {
            png: raw.flags.png,
            svg: raw.flags.svg,
        },
        alpha2_code: raw.cca2,
        alpha3_code: raw.cca3,
        currencies: raw.currencies.map(|currencies| {
            currencies
                .into_iter()
                .map(|(code, currency)| Currency {
                    code,
                    name: currency.name,
                    symbol: currency.symbol.filter(|s| !s.is_empty()),
                })
                .collect()
        }),
        languages: raw.languages.map(|languages| {
            languages
                .into_iter()
                .map(|(code, name)| Language {
                    name,
                    native_name: Some(code),
                })
                .collect()
        }),
        borders: raw.borders,
        continents: raw.continents,
    }
}

/// Parses, validates and normalizes a single raw record.
///
/// # Errors
///
/// Returns `RecordError::Shape` when the structure or types do not match, or
/// `RecordError::Constraint` when a value constraint fails.
pub fn parse_record(value: &Value) -> Result<Country, RecordError> {
    let raw = RawCountry::deserialize(value)?;
    raw.validate()?;
    Ok(normalize(raw))
}

/// Parses an upstream payload into normalized countries.
///
/// The payload must be a JSON array; an empty array is a valid, empty result.
/// The whole array is validated in one pass first. If any record fails, the
/// records are re-parsed one by one and the failing ones are logged and
/// dropped, so one malformed record never aborts the batch.
///
/// # Errors
///
/// Returns `CountriesError::InvalidResponseFormat` if the payload is not an
/// array.
pub fn parse_batch(payload: &Value) -> Result<Vec<Country>, CountriesError> {
    let records = match payload.as_array() {
        Some(records) => records,
        None => {
            let kind = json_kind(payload);
            warn!("Invalid API response format: expected array, got {}", kind);
            return Err(CountriesError::InvalidResponseFormat(kind.to_string()));
        }
    };

    if records.is_empty() {
        warn!("API returned empty array of countries");
        return Ok(Vec::new());
    }

    match parse_all(payload) {
        Ok(countries) => {
            debug!("Validated and normalized {} countries", countries.len());
            Ok(countries)
        }
        Err(e) => {
            warn!(
                "Batch validation failed ({}), recovering valid countries one by one: {}",
                ErrorType::RecordSchemaError,
                e
            );
            let countries = recover_records(records);
            info!(
                "Recovered {} of {} countries ({} dropped)",
                countries.len(),
                records.len(),
                records.len() - countries.len()
            );
            Ok(countries)
        }
    }
}

/// Fast path: deserialize and validate every record, failing on the first
/// invalid one.
fn parse_all(payload: &Value) -> Result<Vec<Country>, RecordError> {
    let raws = Vec::<RawCountry>::deserialize(payload)?;
    for raw in &raws {
        raw.validate()?;
    }
    Ok(raws.into_iter().map(normalize).collect())
}

fn recover_records(records: &[Value]) -> Vec<Country> {
    records
        .iter()
        .filter_map(|record| match parse_record(record) {
            Ok(country) => Some(country),
            Err(e) => {
                warn!("Skipped invalid country {}: {}", record_label(record), e);
                None
            }
        })
        .collect()
}

/// Best-effort display name of a raw record, for log lines.
fn record_label(record: &Value) -> &str {
    record
        .pointer("/name/common")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
