//! Normalization from raw provider records to [`CanonicalListing`].
//!
//! Normalization never fails: each field is read permissively and falls back
//! to its documented default when absent or mistyped.

use nyumba_core::{
    CanonicalListing, Coordinates, DEFAULT_ADDRESS, DEFAULT_CONTACT, DEFAULT_HOURS, DEFAULT_LINK,
    DEFAULT_NAME, DEFAULT_PRICE, DEFAULT_PROPERTY_TYPE,
};

use crate::parse_helpers::{
    coerce_count, coerce_f64, http_url, nested_str, non_empty_str, text_or_number,
};
use crate::types::RawListing;

/// Currency marker searched for in descriptions.
const PRICE_MARKER: &str = "KSh";

/// Converts one raw provider record into a default-complete listing.
#[must_use]
pub fn normalize_listing(raw: &RawListing) -> CanonicalListing {
    let description = non_empty_str(raw.get("description"));
    let price = description
        .as_deref()
        .and_then(extract_price)
        .unwrap_or_else(|| DEFAULT_PRICE.to_string());

    let direct_link = non_empty_str(raw.get("link"));
    let website_link = nested_str(raw.get("links"), "website");
    let directions_link = nested_str(raw.get("links"), "directions");
    let maps_link = nested_str(raw.get("directions"), "google_url");

    let link = [&direct_link, &website_link, &directions_link, &maps_link]
        .into_iter()
        .find_map(Clone::clone)
        .unwrap_or_else(|| DEFAULT_LINK.to_string());

    let rating = coerce_f64(raw.get("rating"))
        .filter(|r| *r >= 0.0)
        .unwrap_or(0.0);

    CanonicalListing {
        name: non_empty_str(raw.get("title")).unwrap_or_else(|| DEFAULT_NAME.to_string()),
        property_type: non_empty_str(raw.get("type"))
            .unwrap_or_else(|| DEFAULT_PROPERTY_TYPE.to_string()),
        rating,
        review_count: coerce_count(raw.get("reviews")).unwrap_or(0),
        address: non_empty_str(raw.get("address")).unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
        contact: non_empty_str(raw.get("phone")).unwrap_or_else(|| DEFAULT_CONTACT.to_string()),
        hours: non_empty_str(raw.get("hours")).unwrap_or_else(|| DEFAULT_HOURS.to_string()),
        years_in_business: text_or_number(raw.get("years_in_business")),
        website: http_url(direct_link.or(website_link)),
        directions_link: http_url(directions_link.or(maps_link)),
        link,
        coordinates: coordinates(raw),
        description,
        price,
        recommendation_score: 0.0,
    }
}

/// Normalizes every record, preserving provider order.
#[must_use]
pub fn normalize_listings(records: &[RawListing]) -> Vec<CanonicalListing> {
    records.iter().map(normalize_listing).collect()
}

/// Best-effort price: the text after the first `KSh`, trimmed.
///
/// Returns `None` when the marker is absent or nothing follows it.
#[must_use]
pub fn extract_price(description: &str) -> Option<String> {
    let (_, after) = description.split_once(PRICE_MARKER)?;
    let trimmed = after.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn coordinates(raw: &RawListing) -> Option<Coordinates> {
    let gps = raw.get("gps_coordinates")?;
    Some(Coordinates {
        latitude: coerce_f64(gps.get("latitude"))?,
        longitude: coerce_f64(gps.get("longitude"))?,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
