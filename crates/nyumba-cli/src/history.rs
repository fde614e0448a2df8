/// Print the most recent stored searches.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_history(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let rows = nyumba_db::list_recent_searches(pool, limit.max(1)).await?;

    if rows.is_empty() {
        println!("no searches stored yet; run `search` first");
        return Ok(());
    }

    println!("{:<18}{:<20}{:<9}QUERY", "WHEN", "LOCATION", "RESULTS");
    for row in &rows {
        println!(
            "{:<18}{:<20}{:<9}{}",
            row.created_at.format("%Y-%m-%d %H:%M"),
            truncate(&row.location, 18),
            row.results_count,
            row.query
        );
    }

    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max - 3).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Karen", 18), "Karen");
    }

    #[test]
    fn truncate_shortens_long_text() {
        assert_eq!(truncate("Kilimani, Nairobi County", 12), "Kilimani,...");
    }
}
