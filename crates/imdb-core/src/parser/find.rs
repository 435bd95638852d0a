//! Search results parser for imdb.com `/find` pages
//!
//! Extracts typed result records from the semi-structured results listing
//! and classifies them by identifier prefix and nearby markup text.

use scraper::{ElementRef, Html, Selector};

use crate::error::{ImdbError, Result};
use crate::types::{SearchResult, Subtype, Type};

/// Subtype markers as they appear in result markup. Matching is
/// case-sensitive, first match wins; the listed order is a compatibility
/// contract and must not be reordered.
const SUBTYPE_MARKERS: [(&str, Subtype); 5] = [
    ("TV Mini Series", Subtype::Series),
    ("TV Series", Subtype::Series),
    ("TV Short", Subtype::Series),
    ("TV Episode", Subtype::Episode),
    ("Video Game", Subtype::Game),
];

/// Classify a result from its identifier and surrounding markup text.
///
/// The coarse type comes from the 2-character id prefix. Titles default to
/// [`Subtype::Movie`] unless a marker phrase overrides them, and carry a
/// year when `nearby` contains a plausible `(YYYY)` pattern. Non-title
/// results never carry a subtype or year.
///
/// # Examples
/// ```
/// use imdb_core::parser::classify;
/// use imdb_core::{Subtype, Type};
///
/// let (typ, subtype, year) = classify("tt1561755", "(2011) TV Series");
/// assert_eq!(typ, Type::Title);
/// assert_eq!(subtype, Some(Subtype::Series));
/// assert_eq!(year.as_deref(), Some("2011"));
/// ```
pub fn classify(id: &str, nearby: &str) -> (Type, Option<Subtype>, Option<String>) {
    let typ = Type::from_id(id);
    if typ != Type::Title {
        return (typ, None, None);
    }
    let mut subtype = Subtype::Movie;
    for (marker, candidate) in SUBTYPE_MARKERS {
        if nearby.contains(marker) {
            subtype = candidate;
            break;
        }
    }
    (typ, Some(subtype), extract_year(nearby))
}

/// Extract a plausible 4-digit year from a `(YYYY)` pattern in `text`.
///
/// Values outside the open interval (1800, 2100) are treated as absent.
pub fn extract_year(text: &str) -> Option<String> {
    let re = regex_lite::Regex::new(r"\((\d{4})\)").ok()?;
    let caps = re.captures(text)?;
    let year = caps.get(1)?.as_str();
    let value: u32 = year.parse().ok()?;
    if value > 1800 && value < 2100 {
        Some(year.to_string())
    } else {
        None
    }
}

/// Parse search results from a `/find` page, resolving relative links
/// against `base_url`.
///
/// Malformed individual result nodes are skipped; only document-level
/// failures surface as errors. Returned results preserve document order.
pub fn parse_find_results(html: &str, base_url: &str) -> Result<Vec<SearchResult>> {
    let document = Html::parse_document(html);
    let item_selector = Selector::parse(".find-result-item")
        .map_err(|e| ImdbError::Parse(format!("invalid selector: {:?}", e)))?;
    let base =
        reqwest::Url::parse(base_url).map_err(|e| ImdbError::InvalidUrl(e.to_string()))?;

    let mut results = Vec::new();
    for element in document.select(&item_selector) {
        if let Some(result) = parse_find_item(&element, &base) {
            results.push(result);
        }
    }
    Ok(results)
}

/// Parse a single result node, or `None` if it should be skipped.
fn parse_find_item(element: &ElementRef, base: &reqwest::Url) -> Option<SearchResult> {
    let link_selector = Selector::parse("a").ok()?;
    let link = element.select(&link_selector).next()?;

    // only site-relative links identify an entity detail page
    let href = link.value().attr("href")?;
    if href.is_empty() || !href.starts_with('/') {
        return None;
    }

    let mut url = base.join(href).ok()?;
    let id = url
        .path_segments()?
        .rev()
        .find(|segment| !segment.is_empty())?
        .to_string();

    let (result_type, subtype, year) = classify(&id, &nearby_text(element));

    url.set_query(None);
    let title = link.text().collect::<String>().trim().to_string();

    Some(SearchResult {
        url: url.to_string(),
        id,
        title,
        result_type,
        subtype,
        year,
    })
}

/// Text of the detail list items next to the result link (year, kind).
fn nearby_text(element: &ElementRef) -> String {
    let Ok(selector) = Selector::parse("li") else {
        return String::new();
    };
    element
        .select(&selector)
        .map(|li| li.text().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
