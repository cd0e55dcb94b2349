//! Command-line interface definitions for the media harvester.
//!
//! Every option can be given as a flag; the ones that make sense across runs
//! also read an environment variable.

use crate::models::{DEFAULT_MAX_ARTICLES, Platform};
use crate::outputs::OutputFormat;
use chrono::NaiveDate;
use clap::Parser;
use std::path::PathBuf;

/// Output directory used when neither the CLI nor the config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "scraped_media_data";

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # One month of flood coverage across all sites
/// media_harvest -k banjir -s 2024-01-01 -e 2024-01-31
///
/// # Two sites only, JSON output, at most three pages each
/// media_harvest -k "banjir bandang" -s 2024-01-01 -e 2024-01-31 \
///     --site detik --site kompas --format json --max-pages 3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Keyword to search for (matched case-insensitively against titles)
    #[arg(short, long)]
    pub keyword: String,

    /// First day of the date range, YYYY-MM-DD (inclusive)
    #[arg(short, long, value_parser = parse_date)]
    pub start: NaiveDate,

    /// Last day of the date range, YYYY-MM-DD (inclusive)
    #[arg(short, long, value_parser = parse_date)]
    pub end: NaiveDate,

    /// Maximum number of articles kept per site
    #[arg(short = 'n', long, default_value_t = DEFAULT_MAX_ARTICLES)]
    pub max_articles: usize,

    /// Directory the output file is written to [default: scraped_media_data]
    #[arg(short, long, env = "MEDIA_HARVEST_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Output file format
    #[arg(long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Restrict the run to these sites (detik, kompas, cnn, tempo, liputan6,
    /// viva, antara). Repeatable; all sites when omitted.
    #[arg(long = "site", value_parser = parse_platform)]
    pub sites: Vec<Platform>,

    /// Stop each site after this many result pages (at least 1)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// Optional path to a YAML config file
    #[arg(short, long, env = "MEDIA_HARVEST_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Selected platforms in crawl order, without duplicates.
    pub fn platforms(&self) -> Vec<Platform> {
        if self.sites.is_empty() {
            return Platform::ALL.to_vec();
        }
        Platform::ALL
            .into_iter()
            .filter(|p| self.sites.contains(p))
            .collect()
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {s:?} ({e})"))
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    Platform::from_slug(s).ok_or_else(|| {
        let known: Vec<&str> = Platform::ALL.iter().map(|p| p.slug()).collect();
        format!("unknown site {s:?}; expected one of {}", known.join(", "))
    })
}
