//! # Media Harvest
//!
//! Collects news headlines for a keyword and date range from seven
//! Indonesian news sites and writes them to a single CSV or JSON file.
//!
//! ## Sources
//!
//! Detik.com, Kompas.com, CNNIndonesia.com, Tempo.co, Liputan6.com,
//! Viva.co.id and AntaraNews.com, always crawled in that order.
//!
//! ## Usage
//!
//! ```sh
//! media_harvest -k banjir -s 2024-01-01 -e 2024-01-31
//! ```
//!
//! ## Architecture
//!
//! 1. **Search**: page through each site's search results
//! 2. **Extract**: pull title, date and link out of every result block
//! 3. **Filter**: keep keyword matches dated inside the range
//! 4. **Output**: write all records to one timestamped file

use clap::Parser;
use std::error::Error;
use std::path::PathBuf;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod crawler;
mod dates;
mod filter;
mod harvest;
mod http;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, DEFAULT_OUTPUT_DIR};
use config::HarvestConfig;
use crawler::CrawlOptions;
use models::SearchQuery;
use outputs::OutputFormat;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("media_harvest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = HarvestConfig::load(args.config.as_deref())?;

    let query = match SearchQuery::new(&args.keyword, args.start, args.end, args.max_articles) {
        Ok(q) => q,
        Err(e) => {
            error!(error = %e, "Invalid search query");
            return Err(e.into());
        }
    };

    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.output_dir.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    // Early check: fail before crawling if the output cannot be written
    if let Err(e) = ensure_writable_dir(&output_dir.to_string_lossy()).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let mut options = CrawlOptions::from(&config.crawl);
    if args.max_pages.is_some() {
        options.max_pages = args.max_pages;
    }

    let profiles: Vec<_> = args
        .platforms()
        .into_iter()
        .map(scrapers::profile)
        .collect();

    info!(
        keyword = %query.keyword(),
        start = %query.start(),
        end = %query.end(),
        max_per_site = query.max_articles_per_site(),
        sites = profiles.len(),
        "Starting harvest"
    );

    let harvest = harvest::harvest(&profiles, &query, &config, &options).await?;

    let path = match args.format {
        OutputFormat::Csv => {
            outputs::csv::write_records(&harvest.records, &output_dir, query.keyword()).await?
        }
        OutputFormat::Json => {
            outputs::json::write_records(&harvest.records, &output_dir, query.keyword()).await?
        }
    };

    if harvest.records.is_empty() {
        println!("No articles found for \"{}\".", query.keyword());
    } else {
        println!("Found {} articles:", harvest.records.len());
        for (i, record) in harvest.records.iter().enumerate() {
            println!("{}. {} ({})", i + 1, record.title, record.platform);
        }
    }
    println!("Saved to {}", path.display());

    let elapsed = start_time.elapsed();
    info!(
        elapsed_secs = elapsed.as_secs_f64(),
        elapsed_human = format!("{:.2}s", elapsed.as_secs_f64()),
        records = harvest.records.len(),
        failed_sites = harvest.failed_sites(),
        "Execution complete"
    );

    Ok(())
}
