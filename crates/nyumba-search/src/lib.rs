//! Search-provider adapter: fetches raw local results from SerpApi and
//! normalizes them into [`nyumba_core::CanonicalListing`] records.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

mod parse_helpers;
mod retry;

pub use client::{SerpApiClient, SEARCH_QUERY};
pub use error::SearchError;
pub use normalize::{extract_price, normalize_listing, normalize_listings};
pub use types::{ProviderResponse, RawListing};
