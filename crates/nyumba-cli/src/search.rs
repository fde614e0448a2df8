//! `search` and `resolve` command handlers and their terminal rendering.

use nyumba_core::{
    google_maps_search_url, AppConfig, CanonicalListing, MapView, SearchResult, SearchStatus,
};

/// Runs one search and prints the summary, listing cards, recommendations
/// and map center.
///
/// When `persist` is set and a database is configured, a successful search is
/// stored; storage failures are logged and do not fail the command.
///
/// # Errors
///
/// Returns an error if the clients cannot be built or the search ends with an
/// error envelope (validation or resolution failure).
pub(crate) async fn run_search(
    config: &AppConfig,
    text: &str,
    location: Option<&str>,
    top: Option<usize>,
    persist: bool,
) -> anyhow::Result<()> {
    let mut orchestrator = nyumba_engine::orchestrator_from_config(config)?;
    if let Some(top) = top {
        orchestrator = orchestrator.with_top_n(top);
    }

    let result = match location {
        Some(location) => orchestrator.search_and_recommend(location, Some(text)).await,
        None => orchestrator.search_text(text).await,
    };

    if result.status == SearchStatus::Error {
        anyhow::bail!(
            "{}",
            result.user_message().unwrap_or("search failed")
        );
    }

    print!("{}", render_result(&result));

    if persist && config.database_url.is_some() {
        persist_search(config, text, &result).await;
    }
    Ok(())
}

/// Prints the resolved location and the strategy that found it.
///
/// # Errors
///
/// Returns an error if the model client cannot be built.
pub(crate) async fn run_resolve(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let orchestrator = nyumba_engine::orchestrator_from_config(config)?;
    let resolved = orchestrator.resolve_location(text).await;
    match resolved.as_deref() {
        Some(location) => println!("{location} (via {})", resolved.method),
        None => println!("no location found"),
    }
    Ok(())
}

async fn persist_search(config: &AppConfig, text: &str, result: &SearchResult) {
    let Some(location) = result.location.as_deref() else {
        return;
    };
    if result.listings.is_empty() {
        return;
    }
    let stored = async {
        let pool = nyumba_db::connect_from_app_config(config).await?;
        nyumba_db::record_search(&pool, text, location, &result.listings).await
    }
    .await;
    match stored {
        Ok(row) => tracing::info!(search_id = %row.public_id, "search stored"),
        Err(e) => tracing::warn!(location, error = %e, "failed to store search"),
    }
}

pub(crate) fn render_result(result: &SearchResult) -> String {
    if result.listings.is_empty() {
        return format!(
            "{}\n",
            result.user_message().unwrap_or("No properties found")
        );
    }

    let mut out = String::new();
    if let Some(summary) = &result.summary {
        out.push_str(&format!("{summary}\n\n"));
    }

    out.push_str("== Listings ==\n");
    for listing in &result.listings {
        out.push_str(&render_card(listing));
        out.push('\n');
    }

    out.push_str(&render_recommendations(result));

    let map = MapView::from_listings(&result.listings);
    out.push_str(&format!(
        "\nMap center: {:.4}, {:.4} ({} pinned)\n",
        map.center.latitude,
        map.center.longitude,
        map.markers.len()
    ));
    if let Some(location) = result.location.as_deref() {
        out.push_str(&format!(
            "Google Maps: {}\n",
            google_maps_search_url(location)
        ));
    }
    out
}

pub(crate) fn render_card(listing: &CanonicalListing) -> String {
    let mut card = format!(
        "{}\n  {} ({} reviews)\n  Type: {}\n  Address: {}\n",
        listing.name,
        listing.stars(),
        listing.review_count,
        listing.property_type,
        listing.address,
    );
    if let Some(description) = &listing.description {
        card.push_str(&format!("  Description: {description}\n"));
    }
    if listing.has_price() {
        card.push_str(&format!("  Price: {}\n", listing.price));
    }
    if let Some(years) = &listing.years_in_business {
        card.push_str(&format!("  Experience: {years}\n"));
    }
    card.push_str(&format!("  Contact: {}\n", listing.contact));
    card.push_str(&format!("  Hours: {}\n", listing.hours));
    if let Some(website) = &listing.website {
        card.push_str(&format!("  Website: {website}\n"));
    }
    if let Some(directions) = &listing.directions_link {
        card.push_str(&format!("  Directions: {directions}\n"));
    }
    card
}

pub(crate) fn render_recommendations(result: &SearchResult) -> String {
    let mut out = String::from("== Top Recommended Properties ==\n");
    for (i, listing) in result.recommended().enumerate() {
        out.push_str(&format!(
            "{}. {} - {} stars ({} reviews), score {:.1}\n   Contact: {}\n",
            i + 1,
            listing.name,
            listing.rating,
            listing.review_count,
            listing.recommendation_score,
            listing.contact
        ));
    }
    out
}
