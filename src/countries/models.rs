//! Country data structures.
//!
//! `RawCountry` mirrors the REST Countries v3.1 JSON shape and is only ever
//! produced by deserialization. `Country` is the flat record handed to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One country as returned by REST Countries.
///
/// Optional upstream fields accept both absence and `null`. Unknown fields are
/// ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCountry {
    /// Localized names
    pub name: RawName,
    /// Capital cities, main one first
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    /// Region (what the dashboard calls a continent)
    pub region: String,
    /// Subregion
    #[serde(default)]
    pub subregion: Option<String>,
    /// Population; any JSON number, integral or not
    pub population: f64,
    /// Area in km²
    #[serde(default)]
    pub area: Option<f64>,
    /// Flag image URLs
    pub flags: RawFlags,
    /// ISO 3166-1 alpha-2 code
    pub cca2: String,
    /// ISO 3166-1 alpha-3 code
    pub cca3: String,
    /// Currency code to currency
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, RawCurrency>>,
    /// Language code to language name
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
    /// Alpha-3 codes of bordering countries
    #[serde(default)]
    pub borders: Option<Vec<String>>,
    /// Continent names
    pub continents: Vec<String>,
}

/// Localized name variants.
#[derive(Debug, Clone, Deserialize)]
pub struct RawName {
    /// Common English name, used as the display name
    pub common: String,
    /// Official English name
    pub official: String,
    /// Native-language names keyed by language code
    #[serde(default, rename = "nativeName")]
    pub native_name: Option<BTreeMap<String, RawNativeName>>,
}

/// A name in one native language.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNativeName {
    /// Official native name
    pub official: String,
    /// Common native name
    pub common: String,
}

/// Upstream flag URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFlags {
    /// Raster flag
    pub png: String,
    /// Vector flag
    pub svg: String,
}

/// Upstream currency entry.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrency {
    /// Currency name
    pub name: String,
    /// Currency symbol
    #[serde(default)]
    pub symbol: Option<String>,
}

/// Normalized country record.
///
/// Built fresh on every fetch and never mutated. `alpha2_code` and
/// `alpha3_code` are the only identity; borders reference other records'
/// `alpha3_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    /// Display name
    pub name: String,
    /// Main capital
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    /// Region
    pub region: String,
    /// Subregion
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    /// Population
    pub population: f64,
    /// Area in km², absent when unknown or zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    /// Flag image URLs
    pub flags: Flags,
    /// ISO 3166-1 alpha-2 code
    pub alpha2_code: String,
    /// ISO 3166-1 alpha-3 code
    pub alpha3_code: String,
    /// Currencies, sorted by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currencies: Option<Vec<Currency>>,
    /// Languages, sorted by code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Language>>,
    /// Alpha-3 codes of bordering countries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
    /// Continent names
    pub continents: Vec<String>,
}

/// Flag image URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    /// Raster flag
    pub png: String,
    /// Vector flag
    pub svg: String,
}

/// One currency of a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 code (the key of the upstream currencies map)
    pub code: String,
    /// Currency name
    pub name: String,
    /// Currency symbol, absent when empty upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

/// One official language of a country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    /// Language name
    pub name: String,
    /// Upstream language key (e.g. `"fra"`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub native_name: Option<String>,
}
