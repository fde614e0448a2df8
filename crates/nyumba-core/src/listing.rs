//! The canonical listing record every provider result is normalized into.

use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Unknown Property";
pub const DEFAULT_PROPERTY_TYPE: &str = "Property";
pub const DEFAULT_ADDRESS: &str = "Address not available";
pub const DEFAULT_CONTACT: &str = "Contact not available";
pub const DEFAULT_HOURS: &str = "Hours not specified";
pub const DEFAULT_PRICE: &str = "Price not specified";
pub const DEFAULT_LINK: &str = "#";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A default-complete property record.
///
/// Every field has a deterministic fallback, so a listing can always be built
/// from a raw record no matter which provider fields are missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalListing {
    pub name: String,
    pub property_type: String,
    /// Always finite and `>= 0.0`.
    pub rating: f64,
    pub review_count: u32,
    pub address: String,
    pub contact: String,
    pub hours: String,
    pub years_in_business: Option<String>,
    pub website: Option<String>,
    pub directions_link: Option<String>,
    /// Primary outbound link; [`DEFAULT_LINK`] when the record had none.
    pub link: String,
    pub coordinates: Option<Coordinates>,
    pub description: Option<String>,
    pub price: String,
    /// Derived by the ranker; `0.0` until scored.
    pub recommendation_score: f64,
}

impl Default for CanonicalListing {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            property_type: DEFAULT_PROPERTY_TYPE.to_string(),
            rating: 0.0,
            review_count: 0,
            address: DEFAULT_ADDRESS.to_string(),
            contact: DEFAULT_CONTACT.to_string(),
            hours: DEFAULT_HOURS.to_string(),
            years_in_business: None,
            website: None,
            directions_link: None,
            link: DEFAULT_LINK.to_string(),
            coordinates: None,
            description: None,
            price: DEFAULT_PRICE.to_string(),
            recommendation_score: 0.0,
        }
    }
}

impl CanonicalListing {
    /// Returns `true` when a price was extracted from the provider data.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price != DEFAULT_PRICE
    }

    /// Star string for card display: one star per whole point, plus one for a
    /// fractional part of at least one half.
    #[must_use]
    pub fn stars(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = self.rating.floor().min(10.0) as usize;
        let extra = usize::from(self.rating.fract() >= 0.5);
        "⭐".repeat(whole + extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing_uses_placeholders() {
        let listing = CanonicalListing::default();
        assert_eq!(listing.name, "Unknown Property");
        assert_eq!(listing.property_type, "Property");
        assert_eq!(listing.price, "Price not specified");
        assert_eq!(listing.link, "#");
        assert!(!listing.has_price());
    }

    #[test]
    fn stars_round_half_up() {
        let listing = CanonicalListing {
            rating: 4.5,
            ..CanonicalListing::default()
        };
        assert_eq!(listing.stars().chars().count(), 5);

        let listing = CanonicalListing {
            rating: 3.2,
            ..CanonicalListing::default()
        };
        assert_eq!(listing.stars().chars().count(), 3);
    }

    #[test]
    fn listing_serializes_snake_case_fields() {
        let json = serde_json::to_value(CanonicalListing::default()).unwrap();
        assert!(json.get("property_type").is_some());
        assert!(json.get("review_count").is_some());
        assert!(json.get("recommendation_score").is_some());
    }
}
