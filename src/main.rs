//! Bookscout CLI - Amazon product scraping from the command line.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use bookscout::{
    run_ingest, run_server, AppConfig, AppState, HttpFetcher, MemoryCache, MemoryStore,
    ProductCrawler, ProductScraper, ProductSearch, SearchRequest, SqliteStore,
};

/// Bookscout - Amazon product scraper CLI
#[derive(Parser)]
#[command(name = "bookscout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search Amazon and print the extracted records
    Search(SearchArgs),

    /// Search Amazon and upsert the records into a store
    Ingest(IngestArgs),

    /// Serve the HTTP API
    Serve,
}

#[derive(Parser)]
struct SearchArgs {
    /// Search keywords
    query: String,

    /// Number of product records to return (1-50)
    #[arg(short = 'n', long, default_value = "5")]
    num_results: u32,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Parser)]
struct IngestArgs {
    /// Search keywords
    query: String,

    /// Number of product records to ingest (1-50)
    #[arg(short = 'n', long, default_value = "5")]
    num_results: u32,

    /// SQLite database path; omit for an in-memory dry run
    #[arg(long)]
    db: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    match cli.command {
        Commands::Search(args) => run_search(args).await,
        Commands::Ingest(args) => ingest(args).await,
        Commands::Serve => serve().await,
    }
}

fn build_pipeline(config: &AppConfig) -> ProductSearch {
    let fetcher = Arc::new(HttpFetcher::new());
    ProductSearch::new(
        ProductCrawler::new(fetcher.clone()),
        ProductScraper::new(fetcher),
        Arc::new(MemoryCache::new()),
    )
    .with_deadline(config.scrape_deadline)
    .with_cache_ttl(config.cache_ttl)
}

async fn run_search(args: SearchArgs) -> Result<()> {
    let search = build_pipeline(&AppConfig::default());
    let records = search
        .search(SearchRequest::new(&args.query, args.num_results))
        .await?;

    match args.format {
        OutputFormat::Text => {
            println!("\n{} records for \"{}\":\n", records.len(), args.query);
            for (i, record) in records.iter().enumerate() {
                println!("{}. {}", i + 1, record.title);
                if !record.authors.is_empty() {
                    println!("   by {}", record.authors.join(", "));
                }
                if !record.price.is_empty() {
                    println!("   Price: {}", record.price);
                }
                if let Some(rating) = record.rating {
                    match record.review_count {
                        Some(count) => println!("   Rating: {} ({} reviews)", rating, count),
                        None => println!("   Rating: {}", rating),
                    }
                }
                println!("   URL: {}", record.url);
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}

async fn ingest(args: IngestArgs) -> Result<()> {
    let search = build_pipeline(&AppConfig::default());
    let request = SearchRequest::new(&args.query, args.num_results);

    let summary = match &args.db {
        Some(path) => {
            let mut store = SqliteStore::open(path)?;
            run_ingest(&search, &mut store, request).await?
        }
        None => {
            eprintln!("No --db given, ingesting into an in-memory store (dry run)");
            let mut store = MemoryStore::new();
            run_ingest(&search, &mut store, request).await?
        }
    };

    println!(
        "Added {}, updated {}, skipped {} without an ISBN",
        summary.added, summary.updated, summary.skipped
    );
    Ok(())
}

async fn serve() -> Result<()> {
    let config = AppConfig::from_env();
    let search = build_pipeline(&config);
    run_server(AppState::new(search, config)).await?;
    Ok(())
}
