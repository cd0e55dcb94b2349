//! Optional YAML configuration.
//!
//! Every field has a default, so a run works without any file. A config file
//! only needs the keys it wants to change:
//!
//! ```yaml
//! http:
//!   user_agent: "Mozilla/5.0 (X11; Linux x86_64) ..."
//!   timeout_secs: 20
//! crawl:
//!   min_delay_ms: 500
//!   max_delay_ms: 1500
//!   max_pages: 10
//! output_dir: ./out
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use std::time::Duration as StdDuration;
use tracing::{info, instrument};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub http: HttpConfig,
    pub crawl: CrawlConfig,
    /// Overrides the CLI default output directory when set.
    pub output_dir: Option<String>,
}

/// Request headers, timeouts and retry policy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    /// Per-request timeout for sites without retries.
    pub timeout_secs: u64,
    /// Per-request timeout for sites fetched through the retry wrapper.
    pub retry_timeout_secs: u64,
    /// Total attempts per request on retrying sites.
    pub retry_attempts: usize,
    pub retry_base_delay_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: String::from(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
            ),
            accept: String::from(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            accept_language: String::from("en-US,en;q=0.5"),
            timeout_secs: 10,
            retry_timeout_secs: 15,
            retry_attempts: 3,
            retry_base_delay_ms: 1000,
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self, retrying: bool) -> StdDuration {
        if retrying {
            StdDuration::from_secs(self.retry_timeout_secs)
        } else {
            StdDuration::from_secs(self.timeout_secs)
        }
    }

    pub fn retry_base_delay(&self) -> StdDuration {
        StdDuration::from_millis(self.retry_base_delay_ms)
    }
}

/// Pagination throttling and limits.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Lower bound of the random pause between result pages.
    pub min_delay_ms: u64,
    /// Upper bound of the random pause between result pages.
    pub max_delay_ms: u64,
    /// Stop a site after this many pages. Unlimited when unset.
    pub max_pages: Option<u32>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 1000,
            max_delay_ms: 3000,
            max_pages: None,
        }
    }
}

impl HarvestConfig {
    /// Parse a YAML document.
    pub fn from_yaml(text: &str) -> Result<Self, Box<dyn Error>> {
        let config: HarvestConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    #[instrument(level = "info")]
    pub fn load(path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        let config = Self::from_yaml(&text)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.crawl.min_delay_ms > self.crawl.max_delay_ms {
            return Err(format!(
                "crawl.min_delay_ms ({}) exceeds crawl.max_delay_ms ({})",
                self.crawl.min_delay_ms, self.crawl.max_delay_ms
            )
            .into());
        }
        if self.crawl.max_pages == Some(0) {
            return Err("crawl.max_pages must be at least 1".into());
        }
        if self.http.retry_attempts == 0 {
            return Err("http.retry_attempts must be at least 1".into());
        }
        Ok(())
    }
}
