//! Runs every selected site, in order, against one query.
//!
//! Sites are crawled one after another into a single record collection. A
//! site that fails only loses its own remaining pages; the run always moves on
//! to the next site.

use crate::config::HarvestConfig;
use crate::crawler::{CrawlOptions, SiteReport, crawl_site};
use crate::http::{FetchError, HttpFetcher, PageFetcher, RetryFetch};
use crate::models::{ArticleRecord, SearchQuery};
use crate::scrapers::SiteProfile;
use tracing::{info, instrument};

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct Harvest {
    pub records: Vec<ArticleRecord>,
    pub reports: Vec<SiteReport>,
}

impl Harvest {
    pub fn failed_sites(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_failed()).count()
    }
}

/// Crawl `profiles` with the given fetchers. Sites flagged `retry` use
/// `retrying`, the rest use `plain`.
#[instrument(level = "info", skip_all, fields(keyword = %query.keyword(), sites = profiles.len()))]
pub async fn run_sites<F, R>(
    plain: &F,
    retrying: &R,
    profiles: &[&SiteProfile],
    query: &SearchQuery,
    options: &CrawlOptions,
) -> Harvest
where
    F: PageFetcher,
    R: PageFetcher,
{
    let mut harvest = Harvest::default();

    for profile in profiles {
        let report = if profile.retry {
            crawl_site(retrying, profile, query, options, &mut harvest.records).await
        } else {
            crawl_site(plain, profile, query, options, &mut harvest.records).await
        };
        harvest.reports.push(report);
    }

    info!(
        total = harvest.records.len(),
        failed_sites = harvest.failed_sites(),
        "All sites processed"
    );
    harvest
}

/// Build the HTTP clients from `config` and crawl `profiles`.
///
/// # Arguments
///
/// * `profiles` - Sites to crawl, in crawl order
/// * `query` - The validated search query
/// * `config` - Headers, timeouts and retry settings
/// * `options` - Throttle and page limit shared by all sites
///
/// # Returns
///
/// The combined [`Harvest`] of every site.
///
/// # Errors
///
/// Returns [`FetchError`] if an HTTP client cannot be built, for example
/// when the configured user agent is not a valid header value. Site failures
/// are reported in [`Harvest::reports`] instead.
pub async fn harvest(
    profiles: &[&SiteProfile],
    query: &SearchQuery,
    config: &HarvestConfig,
    options: &CrawlOptions,
) -> Result<Harvest, FetchError> {
    let http = &config.http;
    let plain = HttpFetcher::new(http, http.timeout(false))?;
    let retrying = RetryFetch::new(
        HttpFetcher::new(http, http.timeout(true))?,
        http.retry_attempts,
        http.retry_base_delay(),
    );
    Ok(run_sites(&plain, &retrying, profiles, query, options).await)
}
