//! Per-site pagination.
//!
//! [`crawl_site`] walks one site's search results page by page:
//!
//! ```text
//! Requesting --2xx--> Parsing --blocks, below target--> Continuing --sleep--> Requesting
//!     |  404 -> Exhausted(NotFound)     |  no blocks -> Exhausted(NoResults)
//!     |  other -> Failed                |  target met -> Exhausted(TargetReached)
//! ```
//!
//! Both terminal states only end the current site. Accepted records are
//! appended to the caller's collection.

use crate::config::CrawlConfig;
use crate::filter;
use crate::http::PageFetcher;
use crate::models::{ArticleRecord, Platform, SearchQuery};
use crate::scrapers::{SiteProfile, extract};
use rand::{Rng, rng};
use std::fmt;
use std::time::Duration as StdDuration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Random pause between result pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    min_ms: u64,
    max_ms: u64,
}

impl Throttle {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms,
            max_ms: max_ms.max(min_ms),
        }
    }

    /// No pause at all.
    #[cfg(test)]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Uniform in `[min, max]`.
    pub fn delay(&self) -> StdDuration {
        if self.max_ms == 0 {
            return StdDuration::ZERO;
        }
        StdDuration::from_millis(rng().random_range(self.min_ms..=self.max_ms))
    }

    pub async fn pause(&self) {
        let delay = self.delay();
        if !delay.is_zero() {
            debug!(?delay, "Throttling before next page");
            sleep(delay).await;
        }
    }
}

impl Default for Throttle {
    fn default() -> Self {
        Self::new(1000, 3000)
    }
}

/// Knobs shared by every site in a run.
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub throttle: Throttle,
    /// Stop after this many pages even if results keep coming.
    pub max_pages: Option<u32>,
}

impl From<&CrawlConfig> for CrawlOptions {
    fn from(c: &CrawlConfig) -> Self {
        Self {
            throttle: Throttle::new(c.min_delay_ms, c.max_delay_ms),
            max_pages: c.max_pages,
        }
    }
}

/// Why a site stopped without failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustReason {
    /// The site answered 404.
    NotFound,
    /// No block selector matched.
    NoResults,
    /// `max_articles_per_site` records were accepted.
    TargetReached,
    /// The configured page limit was hit.
    PageLimit,
}

impl fmt::Display for ExhaustReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExhaustReason::NotFound => "page not found",
            ExhaustReason::NoResults => "no more results",
            ExhaustReason::TargetReached => "target reached",
            ExhaustReason::PageLimit => "page limit reached",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CrawlState {
    Requesting,
    Parsing(String),
    Continuing,
    Exhausted(ExhaustReason),
    Failed(String),
}

/// Terminal state of a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOutcome {
    Exhausted(ExhaustReason),
    Failed(String),
}

impl SiteOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, SiteOutcome::Failed(_))
    }
}

/// Counters for one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub platform: Platform,
    /// Pages that came back with a 2xx status.
    pub pages_fetched: u32,
    pub accepted: usize,
    /// Candidates turned away by the date or keyword filter.
    pub rejected: usize,
    /// Blocks without a title or link.
    pub skipped: usize,
    /// Blocks whose text lacks the keyword.
    pub keyword_misses: usize,
    pub outcome: SiteOutcome,
}

/// Crawl one site until it is exhausted or fails.
///
/// Pages are requested from 1 upwards with a [`Throttle`] pause between
/// them. Accepted records are appended to `records` in page order.
///
/// # Arguments
///
/// * `fetcher` - Fetcher for the site's search pages
/// * `profile` - Selectors, URL template and date formats of the site
/// * `query` - Keyword, inclusive date range and per-site article limit
/// * `options` - Inter-page throttle and optional page limit
/// * `records` - Shared collection the site's records are appended to
///
/// # Returns
///
/// A [`SiteReport`] with the page and record counters and the terminal
/// [`SiteOutcome`]. Failures end up in the outcome, never as an error.
#[instrument(level = "info", skip_all, fields(platform = %profile.platform))]
pub async fn crawl_site<F: PageFetcher>(
    fetcher: &F,
    profile: &SiteProfile,
    query: &SearchQuery,
    options: &CrawlOptions,
    records: &mut Vec<ArticleRecord>,
) -> SiteReport {
    let keyword = query.keyword();
    let max = query.max_articles_per_site();
    let mut report = SiteReport {
        platform: profile.platform,
        pages_fetched: 0,
        accepted: 0,
        rejected: 0,
        skipped: 0,
        keyword_misses: 0,
        outcome: SiteOutcome::Exhausted(ExhaustReason::NoResults),
    };

    info!(%keyword, max, "Scraping site");
    let mut page = 1u32;
    let mut state = CrawlState::Requesting;

    report.outcome = loop {
        state = match state {
            CrawlState::Requesting => {
                let url = profile.search_url(keyword, page);
                match fetcher.fetch(&url).await {
                    Ok(fetched) if fetched.is_success() => {
                        report.pages_fetched += 1;
                        debug!(page, status = fetched.status, "Fetched results page");
                        CrawlState::Parsing(fetched.body)
                    }
                    Ok(fetched) if fetched.is_not_found() => {
                        info!(page, %url, "Results page not found");
                        CrawlState::Exhausted(ExhaustReason::NotFound)
                    }
                    Ok(fetched) => CrawlState::Failed(format!("HTTP {} for {url}", fetched.status)),
                    Err(e) => CrawlState::Failed(e.to_string()),
                }
            }

            CrawlState::Parsing(body) => match extract(profile, &body, keyword) {
                Err(e) => CrawlState::Failed(format!("extraction failed: {e}")),
                Ok(result) if result.is_empty() => {
                    info!(page, "No more articles");
                    CrawlState::Exhausted(ExhaustReason::NoResults)
                }
                Ok(result) => {
                    report.skipped += result.skipped_incomplete;
                    report.keyword_misses += result.keyword_misses;
                    for candidate in &result.candidates {
                        if report.accepted >= max {
                            break;
                        }
                        match filter::accept(
                            profile.platform,
                            candidate,
                            query,
                            profile.matches_summary(),
                        ) {
                            Ok(record) => {
                                debug!(title = %record.title, "Article accepted");
                                records.push(record);
                                report.accepted += 1;
                            }
                            Err(reason) => {
                                debug!(title = %candidate.title, ?reason, "Article rejected");
                                report.rejected += 1;
                            }
                        }
                    }
                    info!(
                        page,
                        blocks = result.blocks_found,
                        selector = result.matched_selector.unwrap_or_default(),
                        candidates = result.candidates.len(),
                        accepted_total = report.accepted,
                        "Processed results page"
                    );
                    if report.accepted >= max {
                        CrawlState::Exhausted(ExhaustReason::TargetReached)
                    } else {
                        CrawlState::Continuing
                    }
                }
            },

            CrawlState::Continuing => {
                if options.max_pages.is_some_and(|limit| page >= limit) {
                    CrawlState::Exhausted(ExhaustReason::PageLimit)
                } else {
                    page += 1;
                    options.throttle.pause().await;
                    CrawlState::Requesting
                }
            }

            CrawlState::Exhausted(reason) => break SiteOutcome::Exhausted(reason),
            CrawlState::Failed(message) => break SiteOutcome::Failed(message),
        };
    };

    match &report.outcome {
        SiteOutcome::Exhausted(reason) => info!(
            accepted = report.accepted,
            rejected = report.rejected,
            skipped = report.skipped,
            keyword_misses = report.keyword_misses,
            pages = report.pages_fetched,
            %reason,
            "Finished scraping site"
        ),
        SiteOutcome::Failed(message) if report.accepted > 0 => warn!(
            accepted = report.accepted,
            pages = report.pages_fetched,
            error = %message,
            "Site aborted after partial results"
        ),
        SiteOutcome::Failed(message) => error!(error = %message, "Site aborted"),
    }

    report
}
