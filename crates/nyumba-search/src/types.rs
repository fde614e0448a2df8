//! Raw SerpApi `google_local` response shapes.
//!
//! The provider is inconsistent about what it sends back: usually an object
//! with a `local_results` list, sometimes a bare list, a single record, or an
//! `{"error": ...}` object. [`ProviderResponse`] decodes all of them once so
//! the normalizer only ever sees a flat list of records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys whose presence marks a bare object as a listing record.
const LISTING_KEYS: &[&str] = &["title", "address", "place_id", "gps_coordinates"];

/// One loosely-typed provider record. Fields may be absent or mistyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawListing(pub Map<String, Value>);

impl RawListing {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the object carries at least one listing field.
    #[must_use]
    pub fn looks_like_listing(&self) -> bool {
        LISTING_KEYS.iter().any(|key| self.0.contains_key(*key))
    }
}

impl From<Map<String, Value>> for RawListing {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// `local_results` is normally a list but has been observed as one object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    Many(Vec<Value>),
    One(RawListing),
}

/// Every response shape the provider has been seen to return.
///
/// Variant order matters: serde tries them top to bottom.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProviderResponse {
    Wrapped { local_results: OneOrMany },
    Failed { error: String },
    Listings(Vec<Value>),
    Single(RawListing),
}

impl ProviderResponse {
    /// Decodes a JSON body into one of the known shapes.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not an object or a list.
    pub fn decode(body: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(body)
    }

    /// Flattens the response into a record list.
    ///
    /// Non-object list items are dropped. A single object without any listing
    /// field yields no records, whether bare or under `local_results`.
    ///
    /// # Errors
    ///
    /// Returns the provider's message for [`ProviderResponse::Failed`].
    pub fn into_records(self) -> Result<Vec<RawListing>, String> {
        match self {
            ProviderResponse::Wrapped { local_results } => Ok(match local_results {
                OneOrMany::Many(items) => objects_only(items),
                OneOrMany::One(record) => listing_only(record),
            }),
            ProviderResponse::Failed { error } => Err(error),
            ProviderResponse::Listings(items) => Ok(objects_only(items)),
            ProviderResponse::Single(record) => Ok(listing_only(record)),
        }
    }
}

fn listing_only(record: RawListing) -> Vec<RawListing> {
    if record.looks_like_listing() {
        vec![record]
    } else {
        Vec::new()
    }
}

fn objects_only(items: Vec<Value>) -> Vec<RawListing> {
    items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(map) => Some(RawListing(map)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn records(body: Value) -> Result<Vec<RawListing>, String> {
        ProviderResponse::decode(body).unwrap().into_records()
    }

    #[test]
    fn decodes_wrapped_local_results() {
        let out = records(json!({
            "search_metadata": { "status": "Success" },
            "local_results": [{ "title": "A" }, { "title": "B" }]
        }))
        .unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get("title"), Some(&json!("A")));
    }

    #[test]
    fn decodes_wrapped_single_object() {
        let out = records(json!({ "local_results": { "title": "Only" } })).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn empty_wrapped_object_is_empty() {
        let out = records(json!({ "local_results": {} })).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn wrapped_object_without_listing_fields_is_empty() {
        let out = records(json!({
            "local_results": { "places": [{ "title": "Nested" }] }
        }))
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn decodes_bare_list_and_drops_non_objects() {
        let out = records(json!([{ "title": "A" }, "junk", 3, { "title": "B" }])).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn decodes_single_record() {
        let out = records(json!({ "title": "Lone House", "rating": 4.0 })).unwrap();
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn object_without_listing_fields_is_empty() {
        let out = records(json!({ "search_metadata": { "status": "Success" } })).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn null_local_results_is_empty() {
        let out = records(json!({ "local_results": null })).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn error_object_surfaces_message() {
        let err = records(json!({ "error": "Invalid API key." })).unwrap_err();
        assert_eq!(err, "Invalid API key.");
    }

    #[test]
    fn scalar_body_fails_to_decode() {
        assert!(ProviderResponse::decode(json!("nope")).is_err());
    }
}
