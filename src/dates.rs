//! Date-text resolution.
//!
//! Each site prints publication dates its own way, so every scraper carries an
//! ordered list of `strftime` formats. [`resolve`] tries them in order and the
//! first one that parses wins. Nothing here returns an error: text that matches
//! no format becomes [`PublishedAt::Unresolved`] and the caller decides what
//! that means.
//!
//! Indonesian month names are rewritten to English abbreviations first, since
//! chrono's `%b` only knows English.

use crate::models::PublishedAt;
use crate::utils::normalize_whitespace;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static MONTHS_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(januari|februari|maret|april|mei|juni|juli|agustus|agu|agt|september|oktober|okt|november|nopember|nop|desember|des)\b",
    )
    .unwrap()
});

fn month_to_english(id: &str) -> &'static str {
    match id.to_lowercase().as_str() {
        "januari" => "Jan",
        "februari" => "Feb",
        "maret" => "Mar",
        "april" => "Apr",
        "mei" => "May",
        "juni" => "Jun",
        "juli" => "Jul",
        "agustus" | "agu" | "agt" => "Aug",
        "september" => "Sep",
        "oktober" | "okt" => "Oct",
        "november" | "nopember" | "nop" => "Nov",
        _ => "Dec",
    }
}

/// Trim, collapse whitespace and translate Indonesian month names.
pub fn normalize(raw: &str) -> String {
    let collapsed = normalize_whitespace(raw);
    MONTHS_ID
        .replace_all(&collapsed, |caps: &Captures| month_to_english(&caps[1]).to_string())
        .into_owned()
}

fn parse_with(text: &str, format: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(text, format)
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(text, format))
        .ok()
}

/// Resolve `raw` against `formats`, first match wins.
///
/// # Arguments
///
/// * `raw` - Date text as scraped, in English or Indonesian
/// * `formats` - `strftime` formats tried in order
///
/// # Returns
///
/// [`PublishedAt::Resolved`] with the calendar date, or
/// [`PublishedAt::Unresolved`] when the text is empty or no format fits.
pub fn resolve(raw: &str, formats: &[&str]) -> PublishedAt {
    let text = normalize(raw);
    if text.is_empty() {
        return PublishedAt::Unresolved;
    }
    for format in formats {
        if let Some(date) = parse_with(&text, format) {
            return PublishedAt::Resolved(date);
        }
    }
    debug!(raw = %raw, normalized = %text, "No date format matched");
    PublishedAt::Unresolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> PublishedAt {
        PublishedAt::Resolved(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn test_detik_format() {
        assert_eq!(resolve("15 Jan 2024 10:00 WIB", &["%d %b %Y %H:%M WIB"]), ymd(2024, 1, 15));
    }

    #[test]
    fn test_indonesian_month_names() {
        let formats = ["%d %b %Y, %H:%M WIB"];
        assert_eq!(resolve("14 Mei 2025, 09:00 WIB", &formats), ymd(2025, 5, 14));
        assert_eq!(resolve("3 Agustus 2024, 17:45 WIB", &formats), ymd(2024, 8, 3));
        assert_eq!(resolve("21 Des 2023, 08:10 WIB", &formats), ymd(2023, 12, 21));
        assert_eq!(resolve("02 okt 2023, 23:59 WIB", &formats), ymd(2023, 10, 2));
    }

    #[test]
    fn test_first_matching_format_wins() {
        // 01/02 reads as 1 February with %d/%m and 2 January with %m/%d.
        let text = "01/02/2024 10:00";
        assert_eq!(resolve(text, &["%d/%m/%Y %H:%M", "%m/%d/%Y %H:%M"]), ymd(2024, 2, 1));
        assert_eq!(resolve(text, &["%m/%d/%Y %H:%M", "%d/%m/%Y %H:%M"]), ymd(2024, 1, 2));
    }

    #[test]
    fn test_falls_through_to_later_format() {
        let formats = ["%d %b %Y, %H:%M WIB", "%d/%m/%Y %H:%M", "%d %b %Y", "%Y-%m-%d %H:%M"];
        assert_eq!(resolve("2024-01-20 13:30", &formats), ymd(2024, 1, 20));
        assert_eq!(resolve("20 Januari 2024", &formats), ymd(2024, 1, 20));
    }

    #[test]
    fn test_date_only_format() {
        assert_eq!(resolve("15/01/2024", &["%d/%m/%Y %H:%M", "%d/%m/%Y"]), ymd(2024, 1, 15));
    }

    #[test]
    fn test_unparsable_text_is_unresolved() {
        assert_eq!(
            resolve("tanggal tidak diketahui", &["%d %b %Y %H:%M WIB"]),
            PublishedAt::Unresolved
        );
        assert_eq!(resolve("   ", &["%d %b %Y"]), PublishedAt::Unresolved);
        assert_eq!(resolve("15 Jan 2024", &[]), PublishedAt::Unresolved);
    }

    #[test]
    fn test_extra_whitespace_is_collapsed() {
        assert_eq!(
            resolve("  15   Jan 2024\n 10:00  WIB ", &["%d %b %Y %H:%M WIB"]),
            ymd(2024, 1, 15)
        );
    }

    #[test]
    fn test_normalize_leaves_english_months_alone() {
        assert_eq!(normalize("15 Jan 2024"), "15 Jan 2024");
        assert_eq!(normalize("Desember"), "Dec");
        // "Mei" inside a word is not a month.
        assert_eq!(normalize("Meiliana"), "Meiliana");
    }
}
