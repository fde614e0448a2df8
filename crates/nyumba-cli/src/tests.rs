use clap::Parser;
use nyumba_core::{CanonicalListing, Coordinates, Recommendation, RecommendationSet, SearchResult};

use super::*;

#[test]
fn parses_search_with_defaults() {
    let cli = Cli::try_parse_from(["nyumba-cli", "search", "houses in Karen"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            ref text,
            location: None,
            top: None,
            no_persist: false,
        } if text == "houses in Karen"
    ));
}

#[test]
fn parses_search_with_all_flags() {
    let cli = Cli::try_parse_from([
        "nyumba-cli",
        "search",
        "villas",
        "--location",
        "Nyali",
        "--top",
        "5",
        "--no-persist",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Commands::Search {
            location: Some(ref l),
            top: Some(5),
            no_persist: true,
            ..
        } if l == "Nyali"
    ));
}

#[test]
fn search_requires_text() {
    assert!(Cli::try_parse_from(["nyumba-cli", "search"]).is_err());
}

#[test]
fn parses_resolve_command() {
    let cli = Cli::try_parse_from(["nyumba-cli", "resolve", "flats in Kisumu"]).unwrap();
    assert!(matches!(cli.command, Commands::Resolve { ref text } if text == "flats in Kisumu"));
}

#[test]
fn history_limit_defaults_to_ten() {
    let cli = Cli::try_parse_from(["nyumba-cli", "history"]).unwrap();
    assert!(matches!(cli.command, Commands::History { limit: 10 }));
}

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["nyumba-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Ping
        }
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["nyumba-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Db {
            command: DbCommands::Migrate
        }
    ));
}

#[test]
fn missing_command_is_error() {
    assert!(Cli::try_parse_from(["nyumba-cli"]).is_err());
}

fn sample_result() -> SearchResult {
    let villas = CanonicalListing {
        name: "Karen Villas".to_string(),
        rating: 4.6,
        review_count: 30,
        price: "25M".to_string(),
        recommendation_score: 12.2,
        coordinates: Some(Coordinates {
            latitude: -1.32,
            longitude: 36.70,
        }),
        ..CanonicalListing::default()
    };
    let plain = CanonicalListing {
        name: "Hardy Homes".to_string(),
        ..CanonicalListing::default()
    };
    SearchResult::found(
        "Karen",
        vec![villas, plain],
        RecommendationSet::new(vec![Recommendation {
            listing_index: 0,
            score: 12.2,
        }]),
        "Two homes in Karen.".to_string(),
    )
}

#[test]
fn card_shows_price_only_when_known() {
    let result = sample_result();
    let priced = search::render_card(&result.listings[0]);
    let plain = search::render_card(&result.listings[1]);
    assert!(priced.contains("  Price: 25M"));
    assert!(!plain.contains("Price:"));
    assert!(plain.contains("  Contact: Contact not available"));
}

#[test]
fn card_lists_optional_fields_in_order() {
    let listing = CanonicalListing {
        name: "Runda Gardens".to_string(),
        description: Some("Gated community".to_string()),
        years_in_business: Some("10+ years in business".to_string()),
        website: Some("https://runda.example".to_string()),
        directions_link: Some("https://maps.google.com/?cid=7".to_string()),
        ..CanonicalListing::default()
    };
    let card = search::render_card(&listing);
    assert!(card.starts_with("Runda Gardens\n"));
    assert!(card.contains(
        "  Description: Gated community\n  Experience: 10+ years in business\n  Contact:"
    ));
    assert!(card.ends_with(
        "  Website: https://runda.example\n  Directions: https://maps.google.com/?cid=7\n"
    ));
}

#[test]
fn recommendations_list_ranked_listings() {
    let rendered = search::render_recommendations(&sample_result());
    assert!(rendered.contains("1. Karen Villas - 4.6 stars (30 reviews), score 12.2"));
    assert!(!rendered.contains("Hardy Homes"));
}

#[test]
fn result_rendering_includes_map_center_and_link() {
    let rendered = search::render_result(&sample_result());
    assert!(rendered.starts_with("Two homes in Karen."));
    assert!(rendered.contains("Map center: -1.3200, 36.7000 (1 pinned)"));
    assert!(rendered.contains("Google Maps: https://www.google.com/maps/search/?api=1&query=Karen"));
}

#[test]
fn empty_result_prints_message() {
    let result = SearchResult::empty("Garissa", "No properties found in Garissa");
    assert_eq!(search::render_result(&result), "No properties found in Garissa\n");
}
