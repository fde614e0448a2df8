//! Database operations for `search_queries` and `house_listings`.

use chrono::{DateTime, Utc};
use nyumba_core::CanonicalListing;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `search_queries` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SearchQueryRow {
    pub id: i64,
    pub public_id: Uuid,
    pub query: String,
    pub location: String,
    pub results_count: i32,
    pub created_at: DateTime<Utc>,
}

/// A row from the `house_listings` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HouseListingRow {
    pub id: i64,
    pub search_query_id: i64,
    pub title: String,
    pub price: String,
    pub address: String,
    pub link: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub rating: f64,
    pub review_count: i32,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Stores one completed search and its listings.
///
/// The query row and every listing row are written in a single transaction.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; nothing is committed then.
pub async fn record_search(
    pool: &PgPool,
    query: &str,
    location: &str,
    listings: &[CanonicalListing],
) -> Result<SearchQueryRow, DbError> {
    let mut tx = pool.begin().await?;
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, SearchQueryRow>(
        "INSERT INTO search_queries (public_id, query, location, results_count) \
         VALUES ($1, $2, $3, $4) \
         RETURNING id, public_id, query, location, results_count, created_at",
    )
    .bind(public_id)
    .bind(query)
    .bind(location)
    .bind(saturating_i32(listings.len()))
    .fetch_one(&mut *tx)
    .await?;

    for listing in listings {
        let (latitude, longitude) = listing
            .coordinates
            .map_or((None, None), |c| (Some(c.latitude), Some(c.longitude)));

        sqlx::query(
            "INSERT INTO house_listings \
                 (search_query_id, title, price, address, link, latitude, longitude, \
                  rating, review_count, description) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(row.id)
        .bind(&listing.name)
        .bind(&listing.price)
        .bind(&listing.address)
        .bind(&listing.link)
        .bind(latitude)
        .bind(longitude)
        .bind(listing.rating)
        .bind(saturating_i32(listing.review_count))
        .bind(&listing.description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(row)
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Returns the most recent searches, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_searches(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<SearchQueryRow>, DbError> {
    let rows = sqlx::query_as::<_, SearchQueryRow>(
        "SELECT id, public_id, query, location, results_count, created_at \
         FROM search_queries \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Returns the listings stored for one search, in insertion order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_listings_for_search(
    pool: &PgPool,
    search_query_id: i64,
) -> Result<Vec<HouseListingRow>, DbError> {
    let rows = sqlx::query_as::<_, HouseListingRow>(
        "SELECT id, search_query_id, title, price, address, link, latitude, longitude, \
                rating, review_count, description, created_at \
         FROM house_listings \
         WHERE search_query_id = $1 \
         ORDER BY id",
    )
    .bind(search_query_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

fn saturating_i32<T: TryInto<i32>>(value: T) -> i32 {
    value.try_into().unwrap_or(i32::MAX)
}
