//! Search-page scrapers for the supported news sites.
//!
//! Every site is described by a declarative [`SiteProfile`]: the search URL
//! template, an ordered list of block selectors and, per field, an ordered list
//! of selectors to try inside each block. The shared routine in [`extract`]
//! interprets a profile against a fetched page. A list's order is its priority:
//! the first selector that matches wins and the rest are not consulted.
//!
//! # Supported Sources
//!
//! | Source | Module | Date text | Notes |
//! |--------|--------|-----------|-------|
//! | Detik.com | [`detik`] | `title` attribute | |
//! | Kompas.com | [`kompas`] | text after the weekday | fetched with retries |
//! | CNNIndonesia.com | [`cnn`] | element text | |
//! | Tempo.co | [`tempo`] | element text | |
//! | Liputan6.com | [`liputan6`] | element text or `<time>` | |
//! | Viva.co.id | [`viva`] | element text or `<time>` | |
//! | AntaraNews.com | [`antara`] | element text or `<time>` | also matches on the excerpt |

pub mod antara;
pub mod cnn;
pub mod detik;
pub mod extract;
pub mod kompas;
pub mod liputan6;
pub mod tempo;
pub mod viva;

use crate::models::Platform;

pub use extract::extract;

/// Where a field's value is read from once its element is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    /// The element's text content.
    Text,
    /// The named attribute.
    Attr(&'static str),
}

/// Ordered selectors for one field of an article block.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub selectors: &'static [&'static str],
    pub source: FieldSource,
}

impl FieldRule {
    pub const fn text(selectors: &'static [&'static str]) -> Self {
        Self {
            selectors,
            source: FieldSource::Text,
        }
    }

    pub const fn attr(selectors: &'static [&'static str], name: &'static str) -> Self {
        Self {
            selectors,
            source: FieldSource::Attr(name),
        }
    }
}

/// Fixed description of one news site's search results page.
#[derive(Debug)]
pub struct SiteProfile {
    pub platform: Platform,
    /// Origin used to absolutize relative links.
    pub base_url: &'static str,
    /// Search URL with `{query}` and `{page}` placeholders.
    pub search_url: &'static str,
    /// Article block selectors, highest priority first.
    pub blocks: &'static [&'static str],
    pub title: FieldRule,
    pub date: FieldRule,
    pub link: FieldRule,
    /// Excerpt selectors; empty when the site only matches on titles.
    pub summary: &'static [&'static str],
    /// Keep only this `", "`-separated segment of the raw date text.
    pub date_segment: Option<usize>,
    /// Date formats, tried in order.
    pub date_formats: &'static [&'static str],
    /// Fetch through the retry wrapper with the longer timeout.
    pub retry: bool,
}

impl SiteProfile {
    /// Build the search URL for `keyword` and a 1-based `page`.
    pub fn search_url(&self, keyword: &str, page: u32) -> String {
        self.search_url
            .replace("{query}", &urlencoding::encode(keyword))
            .replace("{page}", &page.to_string())
    }

    pub fn matches_summary(&self) -> bool {
        !self.summary.is_empty()
    }
}

/// All profiles in crawl order.
#[cfg(test)]
pub fn all() -> [&'static SiteProfile; 7] {
    Platform::ALL.map(profile)
}

/// The profile for `platform`.
pub fn profile(platform: Platform) -> &'static SiteProfile {
    match platform {
        Platform::Detik => &detik::PROFILE,
        Platform::Kompas => &kompas::PROFILE,
        Platform::CnnIndonesia => &cnn::PROFILE,
        Platform::Tempo => &tempo::PROFILE,
        Platform::Liputan6 => &liputan6::PROFILE,
        Platform::Viva => &viva::PROFILE,
        Platform::Antara => &antara::PROFILE,
    }
}
