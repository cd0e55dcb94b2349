//! JSON output.
//!
//! Writes the same rows as the CSV sink, as a pretty-printed array of objects
//! keyed `platform`, `date`, `title`, `url`, `keyword`.

use super::{OutputFormat, output_path, rows};
use crate::models::ArticleRecord;
use chrono::Local;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// Write `records` to a timestamped JSON file in `output_dir`.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), count = records.len()))]
pub async fn write_records(
    records: &[ArticleRecord],
    output_dir: &Path,
    keyword: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(&rows(records))?;
    let path = output_path(output_dir, keyword, OutputFormat::Json, Local::now().naive_local());

    info!(path = %path.display(), "Writing JSON");
    if let Err(e) = fs::write(&path, json).await {
        error!(path = %path.display(), error = %e, "Failed to write JSON");
        return Err(e.into());
    }
    info!(path = %path.display(), "Wrote JSON file");
    Ok(path)
}
