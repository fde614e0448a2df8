//! Prompt text sent to the language model.

use nyumba_core::CanonicalListing;

/// Query used in the summary prompt when the caller supplied none.
pub const DEFAULT_USER_QUERY: &str = "Show properties";

/// Literal the model returns when the text names no Kenyan location.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Asks the model for a single Kenyan location or the literal `Unknown`.
#[must_use]
pub fn location_prompt(text: &str) -> String {
    format!(
        "Extract the specific location in Kenya where the user is looking for property \
from this query:\n\"{text}\"\n\n\
Only return the location name without any additional text or explanation.\n\
If no specific location in Kenya is mentioned, respond with \"{UNKNOWN_LOCATION}\".\n\n\
For example:\n\
\"I want a house in Westlands\" -> \"Westlands\"\n\
\"Show luxury apartments in Kilimani, Nairobi\" -> \"Kilimani, Nairobi\"\n\
\"What properties are available\" -> \"{UNKNOWN_LOCATION}\""
    )
}

/// Interprets the model's reply to [`location_prompt`].
///
/// Returns `None` for an empty reply or the exact `Unknown` literal.
#[must_use]
pub fn parse_location_reply(reply: &str) -> Option<String> {
    let cleaned = reply
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    if cleaned.is_empty() || cleaned == UNKNOWN_LOCATION {
        None
    } else {
        Some(cleaned.to_owned())
    }
}

/// Renders one listing as the block the summary prompt embeds.
fn listing_block(index: usize, listing: &CanonicalListing) -> String {
    let mut block = format!(
        "{}. {} ({})\n   Address: {}\n   Contact: {}\n   Hours: {}\n   Rating: {} ({} reviews)\n",
        index + 1,
        listing.name,
        listing.property_type,
        listing.address,
        listing.contact,
        listing.hours,
        listing.rating,
        listing.review_count,
    );
    if let Some(years) = &listing.years_in_business {
        block.push_str(&format!("   In business: {years}\n"));
    }
    if listing.has_price() {
        block.push_str(&format!("   Price: {}\n", listing.price));
    }
    if let Some(directions) = &listing.directions_link {
        block.push_str(&format!("   Directions: {directions}\n"));
    }
    block
}

/// Conversational summary request over the normalized listings.
#[must_use]
pub fn summary_prompt(listings: &[CanonicalListing], user_query: Option<&str>) -> String {
    let query = user_query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_USER_QUERY);

    let rendered: String = listings
        .iter()
        .enumerate()
        .map(|(i, l)| listing_block(i, l))
        .collect();

    format!(
        "The user asked: \"{query}\"\n\n\
Here are the property listings in Kenya:\n{rendered}\n\
Please present the properties in a helpful, conversational manner including:\n\
- Property name and type\n\
- Location/address\n\
- Contact information\n\
- Opening hours/availability\n\
- Rating and number of reviews\n\
- Price information (if available)\n\
- Map directions link (if available)\n\n\
Then make 2-3 recommendations at the end based on:\n\
1. Highest rated properties\n\
2. Most reviewed properties\n\
3. Established businesses with years in business\n\
4. Best value based on features and price (if price is available)\n\n\
Format the response with clear section headings and keep it concise.\n\
Focus on what would be most helpful for someone looking for property in Kenya."
    )
}

/// System prompt for follow-up questions about an earlier summary.
#[must_use]
pub fn follow_up_system_prompt(summary: &str) -> String {
    format!(
        "You are a real estate expert assistant. Use this analysis to answer questions:\n\
{summary}\n\n\
Guidelines:\n\
1. Focus on property details from the analysis\n\
2. Compare prices and features when asked\n\
3. Highlight location advantages\n\
4. Keep responses under 3 sentences unless detailed analysis is requested"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_prompt_embeds_text_and_unknown_literal() {
        let prompt = location_prompt("a flat near the coast");
        assert!(prompt.contains("\"a flat near the coast\""));
        assert!(prompt.contains("respond with \"Unknown\""));
    }

    #[test]
    fn reply_unknown_is_no_location() {
        assert_eq!(parse_location_reply("Unknown"), None);
        assert_eq!(parse_location_reply("  \"Unknown\" "), None);
        assert_eq!(parse_location_reply("   "), None);
    }

    #[test]
    fn reply_unknown_match_is_case_sensitive() {
        assert_eq!(parse_location_reply("unknown").as_deref(), Some("unknown"));
    }

    #[test]
    fn reply_strips_quotes_and_whitespace() {
        assert_eq!(
            parse_location_reply(" \"Kilimani, Nairobi\"\n").as_deref(),
            Some("Kilimani, Nairobi")
        );
    }

    #[test]
    fn summary_prompt_defaults_query() {
        let prompt = summary_prompt(&[], None);
        assert!(prompt.starts_with("The user asked: \"Show properties\""));
        let prompt = summary_prompt(&[], Some("  "));
        assert!(prompt.starts_with("The user asked: \"Show properties\""));
    }

    #[test]
    fn summary_prompt_lists_known_fields_only() {
        let priced = CanonicalListing {
            name: "Garden Villas".to_owned(),
            price: "15M".to_owned(),
            directions_link: Some("https://maps.google.com/?cid=1".to_owned()),
            years_in_business: Some("5+ years in business".to_owned()),
            ..CanonicalListing::default()
        };
        let plain = CanonicalListing {
            name: "Plain Homes".to_owned(),
            ..CanonicalListing::default()
        };
        let prompt = summary_prompt(&[priced, plain], Some("homes in Karen"));
        assert!(prompt.contains("1. Garden Villas (Property)"));
        assert!(prompt.contains("   Price: 15M"));
        assert!(prompt.contains("   Directions: https://maps.google.com/?cid=1"));
        assert!(prompt.contains("   In business: 5+ years in business\n   Price: 15M\n"));
        assert!(prompt.contains("2. Plain Homes (Property)"));
        assert_eq!(prompt.matches("   Price:").count(), 1);
        assert_eq!(prompt.matches("   In business:").count(), 1);
    }

    #[test]
    fn follow_up_prompt_embeds_summary() {
        let prompt = follow_up_system_prompt("Three villas in Karen.");
        assert!(prompt.contains("Three villas in Karen."));
        assert!(prompt.contains("under 3 sentences"));
    }
}
