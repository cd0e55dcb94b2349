//! Turns a search results page into candidate articles using a [`SiteProfile`].
//!
//! Block-level problems never abort a page: a block without a title or link is
//! counted and skipped, a block without a date yields an unresolved date.

use super::{FieldRule, FieldSource, SiteProfile};
use crate::dates;
use crate::filter::contains_keyword;
use crate::models::{Candidate, PublishedAt};
use crate::utils::{normalize_whitespace, truncate_for_log};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, instrument, warn};
use url::Url;

static CLASSED_CONTAINERS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div[class], article[class]").unwrap());

/// What one page yielded.
#[derive(Debug, Default)]
pub struct PageResult {
    /// Blocks matched by the winning block selector.
    pub blocks_found: usize,
    pub matched_selector: Option<&'static str>,
    /// Keyword-matching blocks, in page order.
    pub candidates: Vec<Candidate>,
    /// Blocks without a title or a link.
    pub skipped_incomplete: usize,
    /// Complete blocks whose title (and summary) lack the keyword.
    pub keyword_misses: usize,
    /// First class name of every classed `div`/`article`, filled only when no
    /// block selector matched.
    pub observed_classes: Vec<String>,
}

impl PageResult {
    /// No block selector matched: the site is out of results or its markup moved.
    pub fn is_empty(&self) -> bool {
        self.blocks_found == 0
    }
}

enum BlockSkip {
    MissingTitle,
    MissingLink,
    KeywordMiss,
}

/// Extract candidates for `keyword` from `body`.
///
/// # Arguments
///
/// * `profile` - Site profile whose selectors are applied
/// * `body` - HTML of one search results page
/// * `keyword` - Keyword matched against titles (and summaries where enabled)
///
/// # Returns
///
/// A [`PageResult`]. An empty result means no block selector matched.
///
/// # Errors
///
/// Returns an error if the profile's base URL or a block selector does not
/// parse.
#[instrument(level = "debug", skip_all, fields(platform = %profile.platform))]
pub fn extract(
    profile: &SiteProfile,
    body: &str,
    keyword: &str,
) -> Result<PageResult, Box<dyn Error>> {
    let document = Html::parse_document(body);
    let base = Url::parse(profile.base_url)?;
    let mut result = PageResult::default();

    let Some((selector, blocks)) = locate_blocks(profile, &document)? else {
        result.observed_classes = observed_classes(&document);
        warn!(
            platform = %profile.platform,
            classes = ?result.observed_classes,
            "No known article block selector matched"
        );
        return Ok(result);
    };

    result.blocks_found = blocks.len();
    result.matched_selector = Some(selector);
    debug!(selector, blocks = blocks.len(), "Located article blocks");

    for block in blocks {
        match extract_block(profile, &base, block, keyword) {
            Ok(candidate) => result.candidates.push(candidate),
            Err(BlockSkip::MissingTitle) => {
                result.skipped_incomplete += 1;
                debug!("Block has no title; skipping");
            }
            Err(BlockSkip::MissingLink) => {
                result.skipped_incomplete += 1;
                debug!("Block has no link; skipping");
            }
            Err(BlockSkip::KeywordMiss) => result.keyword_misses += 1,
        }
    }

    Ok(result)
}

/// First block selector with at least one match.
fn locate_blocks<'a>(
    profile: &SiteProfile,
    document: &'a Html,
) -> Result<Option<(&'static str, Vec<ElementRef<'a>>)>, Box<dyn Error>> {
    for &css in profile.blocks {
        let selector = Selector::parse(css)?;
        let blocks: Vec<ElementRef<'a>> = document.select(&selector).collect();
        if !blocks.is_empty() {
            return Ok(Some((css, blocks)));
        }
    }
    Ok(None)
}

fn extract_block(
    profile: &SiteProfile,
    base: &Url,
    block: ElementRef<'_>,
    keyword: &str,
) -> Result<Candidate, BlockSkip> {
    let title = field(block, &profile.title).ok_or(BlockSkip::MissingTitle)?;
    let link = field(block, &profile.link).ok_or(BlockSkip::MissingLink)?;

    let summary = if profile.matches_summary() {
        field(block, &FieldRule::text(profile.summary))
    } else {
        None
    };

    let title_hit = contains_keyword(&title, keyword);
    let summary_hit = summary
        .as_deref()
        .is_some_and(|s| contains_keyword(s, keyword));
    if !title_hit && !summary_hit {
        debug!(title = %truncate_for_log(&title, 80), "Title does not contain keyword");
        return Err(BlockSkip::KeywordMiss);
    }

    let raw_date = field(block, &profile.date).map(|raw| match profile.date_segment {
        Some(i) => raw
            .split(", ")
            .nth(i)
            .map(str::to_string)
            .unwrap_or_else(|| raw.clone()),
        None => raw,
    });
    let published_at = match raw_date.as_deref() {
        Some(raw) => dates::resolve(raw, profile.date_formats),
        None => PublishedAt::Unresolved,
    };
    if raw_date.is_some() && !published_at.is_resolved() {
        debug!(raw_date = ?raw_date, "Unparsed date text");
    }

    Ok(Candidate {
        title,
        summary,
        raw_date,
        published_at,
        link: absolutize(base, &link),
    })
}

/// Value of the first selector in `rule` that yields a non-empty value.
fn field(block: ElementRef<'_>, rule: &FieldRule) -> Option<String> {
    rule.selectors.iter().find_map(|css| {
        let selector = Selector::parse(css).ok()?;
        let element = block.select(&selector).next()?;
        let value = match rule.source {
            FieldSource::Text => normalize_whitespace(&element.text().collect::<String>()),
            FieldSource::Attr(name) => element.value().attr(name)?.trim().to_string(),
        };
        (!value.is_empty()).then_some(value)
    })
}

/// Resolve `href` against the site origin unless it already has a scheme.
pub fn absolutize(base: &Url, href: &str) -> String {
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

fn observed_classes(document: &Html) -> Vec<String> {
    document
        .select(&CLASSED_CONTAINERS)
        .filter_map(|el| el.value().attr("class"))
        .filter_map(|c| c.split_whitespace().next())
        .map(str::to_string)
        .unique()
        .sorted()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    const FIXTURE_PROFILE: SiteProfile = SiteProfile {
        platform: Platform::Tempo,
        base_url: "https://www.example.co.id",
        search_url: "https://www.example.co.id/search?q={query}&page={page}",
        blocks: &["div.primary", "div.secondary", "article"],
        title: FieldRule::text(&["h2.title", "h3.title"]),
        date: FieldRule::text(&["span.date"]),
        link: FieldRule::attr(&["a[href]"], "href"),
        summary: &[],
        date_segment: None,
        date_formats: &["%d %b %Y, %H:%M WIB"],
        retry: false,
    };

    #[test]
    fn test_first_matching_block_selector_wins() {
        let html = r#"
            <div class="secondary"><h2 class="title">Banjir A</h2><a href="/a">x</a></div>
            <article><h2 class="title">Banjir B</h2><a href="/b">x</a></article>
        "#;
        let page = extract(&FIXTURE_PROFILE, html, "banjir").unwrap();
        assert_eq!(page.matched_selector, Some("div.secondary"));
        assert_eq!(page.blocks_found, 1);
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].title, "Banjir A");
    }

    #[test]
    fn test_title_fallback_and_relative_link() {
        let html = r#"
            <article>
              <h3 class="title">  Banjir   Bekasi </h3>
              <span class="date">2 Feb 2024, 07:15 WIB</span>
              <a href="/berita/banjir-bekasi">baca</a>
            </article>
        "#;
        let page = extract(&FIXTURE_PROFILE, html, "BANJIR").unwrap();
        let c = &page.candidates[0];
        assert_eq!(c.title, "Banjir Bekasi");
        assert_eq!(c.link, "https://www.example.co.id/berita/banjir-bekasi");
        assert_eq!(c.raw_date.as_deref(), Some("2 Feb 2024, 07:15 WIB"));
        assert_eq!(
            c.published_at,
            PublishedAt::Resolved(chrono::NaiveDate::from_ymd_opt(2024, 2, 2).unwrap())
        );
    }

    #[test]
    fn test_absolute_links_are_kept() {
        let base = Url::parse("https://www.example.co.id").unwrap();
        assert_eq!(
            absolutize(&base, "https://cdn.example.com/a?b=1"),
            "https://cdn.example.com/a?b=1"
        );
        assert_eq!(absolutize(&base, "berita/1"), "https://www.example.co.id/berita/1");
        assert_eq!(absolutize(&base, "//m.example.co.id/x"), "https://m.example.co.id/x");
    }

    #[test]
    fn test_incomplete_blocks_are_counted_not_fatal() {
        let html = r#"
            <article><h2 class="title">Banjir tanpa tautan</h2></article>
            <article><a href="/x">tanpa judul</a></article>
            <article><h2 class="title">Banjir lengkap</h2><a href="/ok">ok</a></article>
            <article><h2 class="title">Gempa</h2><a href="/gempa">ok</a></article>
        "#;
        let page = extract(&FIXTURE_PROFILE, html, "banjir").unwrap();
        assert_eq!(page.blocks_found, 4);
        assert_eq!(page.skipped_incomplete, 2);
        assert_eq!(page.keyword_misses, 1);
        assert_eq!(page.candidates.len(), 1);
        assert_eq!(page.candidates[0].title, "Banjir lengkap");
    }

    #[test]
    fn test_missing_date_is_unresolved() {
        let html = r#"<article><h2 class="title">Banjir</h2><a href="/x">x</a></article>"#;
        let page = extract(&FIXTURE_PROFILE, html, "banjir").unwrap();
        assert_eq!(page.candidates[0].raw_date, None);
        assert_eq!(page.candidates[0].published_at, PublishedAt::Unresolved);
    }

    #[test]
    fn test_no_match_reports_observed_classes() {
        let html = r#"
            <div class="wrapper main"><div class="card-v2">a</div><div class="card-v2 big">b</div></div>
            <div class="promo">c</div>
            <span class="ignored">d</span>
        "#;
        let page = extract(&FIXTURE_PROFILE, html, "banjir").unwrap();
        assert!(page.is_empty());
        assert!(page.candidates.is_empty());
        assert_eq!(page.observed_classes, vec!["card-v2", "promo", "wrapper"]);
    }

    #[test]
    fn test_date_segment_is_selected() {
        static SEGMENTED: SiteProfile = SiteProfile {
            date_segment: Some(1),
            date_formats: &["%d/%m/%Y"],
            ..FIXTURE_PROFILE
        };
        let html = r#"<article><h2 class="title">Banjir</h2><span class="date">Senin, 15/01/2024, 10:00 WIB</span><a href="/x">x</a></article>"#;
        let page = extract(&SEGMENTED, html, "banjir").unwrap();
        assert_eq!(page.candidates[0].raw_date.as_deref(), Some("15/01/2024"));
        assert!(page.candidates[0].published_at.is_resolved());
    }

    #[test]
    fn test_missing_date_segment_keeps_full_text() {
        static SEGMENTED: SiteProfile = SiteProfile {
            date_segment: Some(1),
            date_formats: &["%d/%m/%Y %H:%M"],
            ..FIXTURE_PROFILE
        };
        let html = r#"<article><h2 class="title">Banjir</h2><span class="date">15/01/2024 10:00</span><a href="/x">x</a></article>"#;
        let page = extract(&SEGMENTED, html, "banjir").unwrap();
        assert_eq!(page.candidates[0].raw_date.as_deref(), Some("15/01/2024 10:00"));
        assert!(page.candidates[0].published_at.is_resolved());
    }
}
