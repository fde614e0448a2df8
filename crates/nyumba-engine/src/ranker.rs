//! Multi-factor recommendation scoring.
//!
//! `score = rating * 2 + min(review_count * 0.1, 5) + (1 if years_in_business)`

use nyumba_core::{CanonicalListing, Recommendation, RecommendationSet};

pub const DEFAULT_TOP_N: usize = 3;

const RATING_WEIGHT: f64 = 2.0;
const REVIEW_WEIGHT: f64 = 0.1;
const REVIEW_CAP: f64 = 5.0;
const LONGEVITY_BONUS: f64 = 1.0;

/// Score for a single listing.
#[must_use]
pub fn recommendation_score(listing: &CanonicalListing) -> f64 {
    let rating = listing.rating * RATING_WEIGHT;
    let reviews = (f64::from(listing.review_count) * REVIEW_WEIGHT).min(REVIEW_CAP);
    let longevity = if listing.years_in_business.is_some() {
        LONGEVITY_BONUS
    } else {
        0.0
    };
    rating + reviews + longevity
}

/// Writes the derived score into every listing.
pub fn score_all(listings: &mut [CanonicalListing]) {
    for listing in listings {
        listing.recommendation_score = recommendation_score(listing);
    }
}

/// Top `top_n` listings by score, highest first.
///
/// The sort is stable, so equal scores keep their input order.
#[must_use]
pub fn rank(listings: &[CanonicalListing], top_n: usize) -> RecommendationSet {
    let mut entries: Vec<Recommendation> = listings
        .iter()
        .enumerate()
        .map(|(listing_index, listing)| Recommendation {
            listing_index,
            score: recommendation_score(listing),
        })
        .collect();

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));
    entries.truncate(top_n);
    RecommendationSet::new(entries)
}
