//! Sitemap rendering.
//!
//! The sitemap lists the site root followed by one detail page per country,
//! keyed by the lower-cased two-letter code.

use std::fmt::Write;

use crate::countries::Country;

/// Renders a sitemap for `site_url` and the given countries.
///
/// An empty country list still yields a valid sitemap containing the root.
pub fn render_sitemap(site_url: &str, countries: &[Country]) -> String {
    let base = site_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    push_entry(&mut xml, &format!("{}/", base), "1.0");
    for country in countries {
        let loc = format!(
            "{}/country/{}",
            base,
            country.alpha2_code.to_lowercase()
        );
        push_entry(&mut xml, &loc, "0.8");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn push_entry(xml: &mut String, loc: &str, priority: &str) {
    // Writing to a String cannot fail
    let _ = write!(
        xml,
        "  <url>\n    <loc>{}</loc>\n    <priority>{}</priority>\n  </url>\n",
        escape_xml(loc),
        priority
    );
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
