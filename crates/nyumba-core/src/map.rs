//! Map data for the presentation layer: a center point and one marker per
//! listing with coordinates.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::listing::{CanonicalListing, Coordinates};

/// Nairobi city center, used when no listing carries coordinates.
pub const DEFAULT_MAP_CENTER: Coordinates = Coordinates {
    latitude: -1.2921,
    longitude: 36.8219,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub rating: f64,
    pub review_count: u32,
    pub contact: String,
    pub coordinates: Coordinates,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinates,
    pub markers: Vec<MapMarker>,
}

impl MapView {
    /// Builds the map for `listings`, centering on the mean coordinate.
    #[must_use]
    pub fn from_listings(listings: &[CanonicalListing]) -> Self {
        let markers: Vec<MapMarker> = listings
            .iter()
            .filter_map(|listing| {
                listing.coordinates.map(|coordinates| MapMarker {
                    name: listing.name.clone(),
                    rating: listing.rating,
                    review_count: listing.review_count,
                    contact: listing.contact.clone(),
                    coordinates,
                })
            })
            .collect();

        let center = if markers.is_empty() {
            DEFAULT_MAP_CENTER
        } else {
            #[allow(clippy::cast_precision_loss)]
            let count = markers.len() as f64;
            let (lat, lng) = markers.iter().fold((0.0, 0.0), |(lat, lng), m| {
                (lat + m.coordinates.latitude, lng + m.coordinates.longitude)
            });
            Coordinates {
                latitude: lat / count,
                longitude: lng / count,
            }
        };

        Self { center, markers }
    }
}

/// Google Maps search link for a free-form location string.
#[must_use]
pub fn google_maps_search_url(location: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        utf8_percent_encode(location, NON_ALPHANUMERIC)
    )
}
