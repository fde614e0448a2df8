mod history;
mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nyumba-cli")]
#[command(about = "Search Kenyan property listings from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search listings from a free-text query
    Search {
        /// Free-text query, e.g. "3 bedroom houses in Karen"
        text: String,
        /// Search this location instead of resolving one from the text
        #[arg(long)]
        location: Option<String>,
        /// Number of recommendations to show
        #[arg(long)]
        top: Option<usize>,
        /// Do not store the search even when a database is configured
        #[arg(long)]
        no_persist: bool,
    },
    /// Show which location a query resolves to, without searching
    Resolve {
        text: String,
    },
    /// List recently stored searches
    History {
        #[arg(long, default_value = "10")]
        limit: i64,
    },
    /// Database utilities
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = nyumba_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Search {
            text,
            location,
            top,
            no_persist,
        } => search::run_search(&config, &text, location.as_deref(), top, !no_persist).await,
        Commands::Resolve { text } => search::run_resolve(&config, &text).await,
        Commands::History { limit } => {
            let pool = nyumba_db::connect_from_app_config(&config).await?;
            history::run_history(&pool, limit).await
        }
        Commands::Db { command } => {
            let pool = nyumba_db::connect_from_app_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    nyumba_db::ping(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = nyumba_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
