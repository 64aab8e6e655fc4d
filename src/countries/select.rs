//! Pure selections over normalized countries.

use super::models::Country;

/// Returns the `n` most populous countries, most populous first.
///
/// Ties keep their input order. An empty input yields an empty result, which
/// callers pre-rendering from it treat as "no seed data".
pub fn select_popular(countries: &[Country], n: usize) -> Vec<Country> {
    let mut sorted = countries.to_vec();
    sorted.sort_by(|a, b| b.population.total_cmp(&a.population));
    sorted.truncate(n);
    sorted
}

/// Finds a country by its two- or three-letter code, ignoring case.
pub fn find_by_code<'a>(countries: &'a [Country], code: &str) -> Option<&'a Country> {
    countries.iter().find(|c| {
        c.alpha2_code.eq_ignore_ascii_case(code) || c.alpha3_code.eq_ignore_ascii_case(code)
    })
}

/// Returns the countries of `all` that share a border with `country`.
///
/// Borders are matched on `alpha3_code`. Codes with no matching record are
/// skipped.
pub fn border_countries<'a>(country: &Country, all: &'a [Country]) -> Vec<&'a Country> {
    let Some(borders) = country.borders.as_deref() else {
        return Vec::new();
    };
    all.iter()
        .filter(|c| borders.iter().any(|code| code == &c.alpha3_code))
        .collect()
}

/// Case-insensitive substring match on the display name.
///
/// An empty query matches every country.
pub fn search_by_name<'a>(countries: &'a [Country], query: &str) -> Vec<&'a Country> {
    let needle = query.to_lowercase();
    countries
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}
