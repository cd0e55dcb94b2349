//! HTTP fetching with browser-like headers and optional exponential backoff.
//!
//! # Architecture
//!
//! - [`PageFetcher`]: core trait, one GET returning status and body
//! - [`HttpFetcher`]: `reqwest` implementation with a fixed header set and timeout
//! - [`RetryFetch`]: decorator adding bounded retries to any `PageFetcher`
//!
//! A `404` is returned as an ordinary [`FetchedPage`]; callers decide that it
//! means "no more results". Only network-level trouble becomes a [`FetchError`].
//!
//! # Retry Strategy
//!
//! - At most 3 attempts in total
//! - Retries on HTTP 429/500/502/503/504 and on transient network errors
//! - Exponential backoff starting at 1 second, capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay

use crate::config::HttpConfig;
use rand::{Rng, rng};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue, USER_AGENT};
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, instrument, warn};

/// Status codes worth another attempt.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// A fetched response: status code plus the decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_retryable(&self) -> bool {
        RETRYABLE_STATUSES.contains(&self.status)
    }
}

/// Failures at the fetch boundary.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Timeout or connection failure; worth retrying.
    #[error("transient fetch failure for {url}: {reason}")]
    Transient { url: String, reason: String },

    /// The request itself could not be built or sent.
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("invalid header value for {name}")]
    Header { name: &'static str },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Transient { .. })
    }

    /// Only a request that could never be built or whose redirects were
    /// refused is permanent; any other network failure is transient.
    fn from_reqwest(url: &str, e: reqwest::Error) -> Self {
        if e.is_builder() || e.is_redirect() {
            FetchError::Request {
                url: url.to_string(),
                reason: e.to_string(),
            }
        } else {
            FetchError::Transient {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    }
}

/// One GET request.
pub trait PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

impl<T: PageFetcher> PageFetcher for &T {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}

/// `reqwest`-backed fetcher sending the same browser headers on every request.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client with the configured headers and the given timeout.
    pub fn new(config: &HttpConfig, timeout: StdDuration) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, header_value("User-Agent", &config.user_agent)?);
        headers.insert(ACCEPT, header_value("Accept", &config.accept)?);
        headers.insert(
            ACCEPT_LANGUAGE,
            header_value("Accept-Language", &config.accept_language)?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, FetchError> {
    HeaderValue::from_str(value).map_err(|_| FetchError::Header { name })
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;
        debug!(
            status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(FetchedPage { status, body })
    }
}

/// Wrapper that retries retryable statuses and transient errors with
/// exponential backoff.
///
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    inner: T,
    /// Total attempts, the first one included.
    max_attempts: usize,
    base_delay: StdDuration,
    max_delay: StdDuration,
    jitter: bool,
}

impl<T> RetryFetch<T>
where
    T: PageFetcher,
{
    pub fn new(inner: T, max_attempts: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay: StdDuration::from_secs(30),
            jitter: true,
        }
    }

    /// Disable the random jitter.
    #[cfg(test)]
    pub fn without_jitter(mut self) -> Self {
        self.jitter = false;
        self
    }

    fn delay_for(&self, attempt: usize) -> StdDuration {
        let shift = (attempt - 1).min(16) as u32;
        let mut delay = self.base_delay.saturating_mul(1 << shift);
        if delay > self.max_delay {
            delay = self.max_delay;
        }
        if self.jitter {
            let jitter_ms: u64 = rng().random_range(0..=250);
            delay += StdDuration::from_millis(jitter_ms);
        }
        delay
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> PageFetcher for RetryFetch<T>
where
    T: PageFetcher,
{
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let result = self.inner.fetch(url).await;
            let retry_reason = match &result {
                Ok(page) if page.is_retryable() => format!("status {}", page.status),
                Ok(_) => return result,
                Err(e) if e.is_transient() => e.to_string(),
                Err(_) => return result,
            };

            if attempt >= self.max_attempts {
                error!(
                    attempt,
                    max = self.max_attempts,
                    elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                    reason = %retry_reason,
                    "fetch exhausted retries"
                );
                return result;
            }

            let delay = self.delay_for(attempt);
            warn!(
                attempt,
                max = self.max_attempts,
                ?delay,
                reason = %retry_reason,
                "fetch attempt failed; backing off"
            );
            sleep(delay).await;
        }
    }
}
