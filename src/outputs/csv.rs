//! CSV output.

use super::{OutputFormat, output_path, rows};
use crate::models::ArticleRecord;
use chrono::Local;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// Render `records` as CSV with a header row.
pub fn to_csv(records: &[ArticleRecord]) -> Result<String, Box<dyn Error>> {
    let mut wtr = ::csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());
    for row in rows(records) {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

/// Write `records` to a timestamped CSV file in `output_dir`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), count = records.len()))]
pub async fn write_records(
    records: &[ArticleRecord],
    output_dir: &Path,
    keyword: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = output_path(output_dir, keyword, OutputFormat::Csv, Local::now().naive_local());
    if records.is_empty() {
        info!("No records; writing placeholder row");
    }
    fs::write(&path, to_csv(records)?).await?;
    info!(path = %path.display(), "Wrote CSV file");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platform, PublishedAt};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_harvest_is_one_placeholder_row() {
        let csv = to_csv(&[]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["platform,date,title,url,keyword", "N/A,N/A,No articles found,N/A,N/A"]);
    }

    #[test]
    fn test_records_are_quoted_when_needed() {
        let records = vec![
            ArticleRecord {
                platform: Platform::Detik,
                published_at: PublishedAt::Resolved(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()),
                title: "Banjir Jakarta, Warga Mengungsi".to_string(),
                url: "https://news.detik.com/d-1".to_string(),
                matched_keyword: "banjir".to_string(),
            },
            ArticleRecord {
                platform: Platform::Antara,
                published_at: PublishedAt::Unresolved,
                title: "Banjir susulan".to_string(),
                url: "https://www.antaranews.com/berita/2".to_string(),
                matched_keyword: "banjir".to_string(),
            },
        ];
        let csv = to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            r#"Detik.com,2024-01-15,"Banjir Jakarta, Warga Mengungsi",https://news.detik.com/d-1,banjir"#
        );
        assert_eq!(lines[2], "AntaraNews.com,,Banjir susulan,https://www.antaranews.com/berita/2,banjir");
    }

    #[tokio::test]
    async fn test_write_records_creates_file() {
        let dir = std::env::temp_dir().join(format!("media_harvest_csv_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = write_records(&[], &dir, "banjir bandang").await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("banjir_bandang_") && name.ends_with(".csv"));
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
