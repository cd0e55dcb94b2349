//! Utility functions for text cleanup, file naming and file system checks.
//!
//! - Whitespace normalization for scraped text
//! - String truncation for logging
//! - Keyword sanitization for output file names
//! - Output directory validation

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Collapse runs of whitespace (including newlines and tabs) into one space
/// and trim the ends.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_whitespace("  Banjir\n   Jakarta "), "Banjir Jakarta");
/// ```
pub fn normalize_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` characters with an ellipsis and a count of
/// the dropped bytes appended. Cuts never split a UTF-8 character.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

/// Turn a keyword into a file name prefix.
///
/// Spaces become underscores; anything that is not alphanumeric, `-` or `_`
/// is dropped. An empty result falls back to `"keyword"`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(sanitize_keyword("banjir bandang"), "banjir_bandang");
/// assert_eq!(sanitize_keyword("../etc/passwd"), "etcpasswd");
/// ```
pub fn sanitize_keyword(keyword: &str) -> String {
    let cleaned: String = keyword
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .collect();
    if cleaned.is_empty() {
        String::from("keyword")
    } else {
        cleaned
    }
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if needed, then creates and removes a probe file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Banjir\n\t  Jakarta  "), "Banjir Jakarta");
        assert_eq!(normalize_whitespace(""), "");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        let result = truncate_for_log("ééé", 1);
        assert_eq!(result, "é…(+4 bytes)");
    }

    #[test]
    fn test_sanitize_keyword() {
        assert_eq!(sanitize_keyword("banjir"), "banjir");
        assert_eq!(sanitize_keyword("banjir bandang"), "banjir_bandang");
        assert_eq!(sanitize_keyword(" pemilu 2024 "), "pemilu_2024");
        assert_eq!(sanitize_keyword("../etc/passwd"), "etcpasswd");
        assert_eq!(sanitize_keyword("???"), "keyword");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_missing() {
        let dir = std::env::temp_dir().join(format!("media_harvest_utils_{}", std::process::id()));
        let path = dir.join("nested").to_string_lossy().to_string();
        ensure_writable_dir(&path).await.unwrap();
        assert!(std::path::Path::new(&path).is_dir());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
