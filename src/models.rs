//! Data models shared by the scrapers, the crawler and the output sinks.
//!
//! - [`Platform`]: the seven supported news sites
//! - [`SearchQuery`]: what a harvest run looks for
//! - [`PublishedAt`]: a resolved article date or the `Unresolved` sentinel
//! - [`Candidate`]: one article block as extracted from a search page
//! - [`ArticleRecord`]: an accepted article, ready for output

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::error::Error;
use std::fmt;

/// Default cap on accepted articles per site.
pub const DEFAULT_MAX_ARTICLES: usize = 50;

/// The news sites a harvest run visits, in crawl order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Platform {
    Detik,
    Kompas,
    CnnIndonesia,
    Tempo,
    Liputan6,
    Viva,
    Antara,
}

impl Platform {
    /// Every platform in the fixed crawl order.
    pub const ALL: [Platform; 7] = [
        Platform::Detik,
        Platform::Kompas,
        Platform::CnnIndonesia,
        Platform::Tempo,
        Platform::Liputan6,
        Platform::Viva,
        Platform::Antara,
    ];

    /// Identifier written to the `platform` column.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Detik => "Detik.com",
            Platform::Kompas => "Kompas.com",
            Platform::CnnIndonesia => "CNNIndonesia.com",
            Platform::Tempo => "Tempo.co",
            Platform::Liputan6 => "Liputan6.com",
            Platform::Viva => "Viva.co.id",
            Platform::Antara => "AntaraNews.com",
        }
    }

    /// Short lowercase name accepted by `--site`.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::Detik => "detik",
            Platform::Kompas => "kompas",
            Platform::CnnIndonesia => "cnn",
            Platform::Tempo => "tempo",
            Platform::Liputan6 => "liputan6",
            Platform::Viva => "viva",
            Platform::Antara => "antara",
        }
    }

    /// Look a platform up by slug or display name, ignoring case.
    pub fn from_slug(s: &str) -> Option<Platform> {
        let s = s.trim().to_lowercase();
        Platform::ALL
            .into_iter()
            .find(|p| p.slug() == s || p.name().to_lowercase() == s)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Parameters of one harvest run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: String,
    start: NaiveDate,
    end: NaiveDate,
    max_articles_per_site: usize,
}

/// Reasons a [`SearchQuery`] cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    EmptyKeyword,
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::EmptyKeyword => f.write_str("keyword must not be empty"),
            QueryError::InvertedRange { start, end } => {
                write!(f, "start date {start} is after end date {end}")
            }
        }
    }
}

impl Error for QueryError {}

impl SearchQuery {
    pub fn new(
        keyword: &str,
        start: NaiveDate,
        end: NaiveDate,
        max_articles_per_site: usize,
    ) -> Result<Self, QueryError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(QueryError::EmptyKeyword);
        }
        if start > end {
            return Err(QueryError::InvertedRange { start, end });
        }
        Ok(Self {
            keyword: keyword.to_string(),
            start,
            end,
            max_articles_per_site,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn max_articles_per_site(&self) -> usize {
        self.max_articles_per_site
    }

    /// Inclusive on both ends.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Publication date of an article as far as the page tells us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishedAt {
    Resolved(NaiveDate),
    Unresolved,
}

impl PublishedAt {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PublishedAt::Resolved(d) => Some(*d),
            PublishedAt::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, PublishedAt::Resolved(_))
    }
}

impl Serialize for PublishedAt {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PublishedAt::Resolved(d) => serializer.serialize_str(&d.format("%Y-%m-%d").to_string()),
            PublishedAt::Unresolved => serializer.serialize_none(),
        }
    }
}

/// One article block pulled from a search results page, before filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    /// Excerpt text, only collected for sites that match on it.
    pub summary: Option<String>,
    pub raw_date: Option<String>,
    pub published_at: PublishedAt,
    pub link: String,
}

/// An accepted article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub platform: Platform,
    #[serde(rename = "date")]
    pub published_at: PublishedAt,
    pub title: String,
    pub url: String,
    #[serde(rename = "keyword")]
    pub matched_keyword: String,
}
