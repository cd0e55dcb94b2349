//! Keyword and date-range acceptance policy.
//!
//! A candidate whose date could not be resolved is always accepted; one with a
//! resolved date is accepted only inside the query's inclusive range.

use crate::models::{ArticleRecord, Candidate, Platform, PublishedAt, SearchQuery};
use tracing::debug;

/// Case-insensitive substring test.
pub fn contains_keyword(text: &str, keyword: &str) -> bool {
    text.to_lowercase().contains(&keyword.to_lowercase())
}

/// Why a candidate was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    KeywordMissing,
    OutOfRange,
}

/// Decide whether `candidate` becomes a record for `platform`.
pub fn accept(
    platform: Platform,
    candidate: &Candidate,
    query: &SearchQuery,
    match_summary: bool,
) -> Result<ArticleRecord, Rejection> {
    let keyword = query.keyword();
    let summary_hit = match_summary
        && candidate
            .summary
            .as_deref()
            .is_some_and(|s| contains_keyword(s, keyword));
    if !contains_keyword(&candidate.title, keyword) && !summary_hit {
        return Err(Rejection::KeywordMissing);
    }

    if let PublishedAt::Resolved(date) = candidate.published_at {
        if !query.covers(date) {
            debug!(%platform, title = %candidate.title, %date, "Outside date range");
            return Err(Rejection::OutOfRange);
        }
    }

    Ok(ArticleRecord {
        platform,
        published_at: candidate.published_at,
        title: candidate.title.clone(),
        url: candidate.link.clone(),
        matched_keyword: keyword.to_string(),
    })
}
