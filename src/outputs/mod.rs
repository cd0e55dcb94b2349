//! Output sinks for harvested records.
//!
//! # Submodules
//!
//! - [`csv`]: tabular output, the default
//! - [`json`]: the same rows as a JSON array
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! ├── banjir_20240201_081500.csv
//! └── banjir_bandang_20240201_093012.json
//! ```
//!
//! An empty harvest still produces a file holding one placeholder row, so a
//! run always leaves an artifact behind.

pub mod csv;
pub mod json;

use crate::models::ArticleRecord;
use crate::utils::sanitize_keyword;
use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// One output row: `platform, date, title, url, keyword`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub platform: String,
    /// `YYYY-MM-DD`, empty when the date was never resolved.
    pub date: String,
    pub title: String,
    pub url: String,
    pub keyword: String,
}

impl OutputRow {
    /// Row written when nothing was harvested.
    pub fn placeholder() -> Self {
        Self {
            platform: String::from("N/A"),
            date: String::from("N/A"),
            title: String::from("No articles found"),
            url: String::from("N/A"),
            keyword: String::from("N/A"),
        }
    }
}

impl From<&ArticleRecord> for OutputRow {
    fn from(r: &ArticleRecord) -> Self {
        Self {
            platform: r.platform.name().to_string(),
            date: r
                .published_at
                .date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            title: r.title.clone(),
            url: r.url.clone(),
            keyword: r.matched_keyword.clone(),
        }
    }
}

/// Rows to write for `records`, with the placeholder standing in for none.
pub fn rows(records: &[ArticleRecord]) -> Vec<OutputRow> {
    if records.is_empty() {
        vec![OutputRow::placeholder()]
    } else {
        records.iter().map(OutputRow::from).collect()
    }
}

/// `{dir}/{sanitized keyword}_{YYYYmmdd_HHMMSS}.{ext}`
pub fn output_path(
    dir: &Path,
    keyword: &str,
    format: OutputFormat,
    now: NaiveDateTime,
) -> PathBuf {
    dir.join(format!(
        "{}_{}.{}",
        sanitize_keyword(keyword),
        now.format("%Y%m%d_%H%M%S"),
        format.extension()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, PublishedAt};
    use chrono::NaiveDate;

    #[test]
    fn test_output_path_naming() {
        let now = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(8, 15, 0)
            .unwrap();
        let path = output_path(Path::new("scraped_media_data"), "banjir bandang", OutputFormat::Csv, now);
        assert_eq!(path, Path::new("scraped_media_data/banjir_bandang_20240201_081500.csv"));
        let path = output_path(Path::new("out"), "banjir", OutputFormat::Json, now);
        assert_eq!(path, Path::new("out/banjir_20240201_081500.json"));
    }

    #[test]
    fn test_rows_placeholder_when_empty() {
        assert_eq!(rows(&[]), vec![OutputRow::placeholder()]);
    }

    #[test]
    fn test_unresolved_date_is_blank() {
        let record = ArticleRecord {
            platform: Platform::Viva,
            published_at: PublishedAt::Unresolved,
            title: "Banjir".to_string(),
            url: "https://www.viva.co.id/berita/1".to_string(),
            matched_keyword: "banjir".to_string(),
        };
        let row = OutputRow::from(&record);
        assert_eq!(row.platform, "Viva.co.id");
        assert_eq!(row.date, "");
    }
}
