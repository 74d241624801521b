//! Configuration for the E-utilities client and the yearly survey
//!
//! Defaults survey publications from 2000-01-01 to
//! 2018-12-31, all nine omics keywords, a result cap of 100000 identifiers
//! and at most three requests per 1050 ms window.

use std::collections::HashSet;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{PubMedError, Result};
use crate::keywords::Keyword;
use crate::rate_limit::RateLimiter;
use crate::survey::YearEndPolicy;

/// Production E-utilities endpoint
pub const DEFAULT_BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
/// Tool name reported to NCBI when none is configured
pub const DEFAULT_TOOL: &str = "qbic";
/// Maximum identifiers returned per ESearch query
pub const DEFAULT_RETMAX: usize = 100_000;
/// Rate limiting window
pub const DEFAULT_RATE_WINDOW: Duration = Duration::from_millis(1050);
/// Requests allowed per window without an API key
pub const DEFAULT_MAX_REQUESTS: u32 = 3;
/// Requests allowed per window with an API key
pub const API_KEY_MAX_REQUESTS: u32 = 10;

/// Settings for talking to NCBI E-utilities
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// NCBI API key, raises the default request budget
    pub api_key: Option<String>,
    /// Contact address sent with every request
    pub email: Option<String>,
    /// Tool identifier sent with every request
    pub tool: String,
    /// Base URL of the E-utilities endpoint
    pub base_url: String,
    /// Result cap embedded in each search URL
    pub retmax: usize,
    /// Length of the rate limiting window
    pub rate_window: Duration,
    /// Requests allowed per window; `None` derives it from the API key
    pub max_requests_per_window: Option<u32>,
    /// Timeout for a single HTTP request
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with NCBI defaults
    ///
    /// # Example
    ///
    /// ```
    /// use multiomics_survey::ClientConfig;
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu")
    ///     .with_tool("omics-trends");
    /// assert_eq!(config.effective_max_requests(), 3);
    /// ```
    pub fn new() -> Self {
        Self {
            api_key: None,
            email: None,
            tool: DEFAULT_TOOL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            retmax: DEFAULT_RETMAX,
            rate_window: DEFAULT_RATE_WINDOW,
            max_requests_per_window: None,
            timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    pub fn with_api_key<S: Into<String>>(mut self, api_key: S) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_tool<S: Into<String>>(mut self, tool: S) -> Self {
        self.tool = tool.into();
        self
    }

    /// Point the client at another endpoint (mock servers in tests)
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retmax(mut self, retmax: usize) -> Self {
        self.retmax = retmax;
        self
    }

    /// Allow `max_requests` requests per `window`
    pub fn with_rate_limit(mut self, max_requests: u32, window: Duration) -> Self {
        self.max_requests_per_window = Some(max_requests);
        self.rate_window = window;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Requests per window, taking the API key into account
    pub fn effective_max_requests(&self) -> u32 {
        match (self.max_requests_per_window, &self.api_key) {
            (Some(max), _) => max,
            (None, Some(_)) => API_KEY_MAX_REQUESTS,
            (None, None) => DEFAULT_MAX_REQUESTS,
        }
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("multiomics-survey/{}", env!("CARGO_PKG_VERSION")))
    }

    /// Identification parameters appended to every request, in URL order
    pub fn build_api_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("tool".to_string(), self.tool.clone())];
        if let Some(email) = &self.email {
            params.push(("email".to_string(), email.clone()));
        }
        if let Some(api_key) = &self.api_key {
            params.push(("api_key".to_string(), api_key.clone()));
        }
        params
    }

    pub fn create_rate_limiter(&self) -> RateLimiter {
        RateLimiter::new(self.effective_max_requests(), self.rate_window)
    }

    pub fn validate(&self) -> Result<()> {
        if self.effective_max_requests() == 0 {
            return Err(PubMedError::InvalidConfig(
                "at least one request per window must be allowed".to_string(),
            ));
        }
        if self.rate_window.is_zero() {
            return Err(PubMedError::InvalidConfig(
                "rate limiting window must be longer than zero".to_string(),
            ));
        }
        if self.retmax == 0 {
            return Err(PubMedError::InvalidConfig(
                "retmax must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What to survey: the overall date range and the keywords to combine
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    pub date_from: NaiveDate,
    pub date_until: NaiveDate,
    pub keywords: Vec<Keyword>,
    pub year_end: YearEndPolicy,
}

impl SurveyConfig {
    pub fn new() -> Self {
        Self {
            date_from: NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid default start date"),
            date_until: NaiveDate::from_ymd_opt(2018, 12, 31).expect("valid default end date"),
            keywords: Keyword::ALL.to_vec(),
            year_end: YearEndPolicy::default(),
        }
    }

    pub fn with_date_range(mut self, from: NaiveDate, until: NaiveDate) -> Self {
        self.date_from = from;
        self.date_until = until;
        self
    }

    pub fn with_keywords(mut self, keywords: Vec<Keyword>) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_year_end(mut self, year_end: YearEndPolicy) -> Self {
        self.year_end = year_end;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.date_from > self.date_until {
            return Err(PubMedError::InvalidDateRange {
                from: self.date_from,
                until: self.date_until,
            });
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = self.keywords.iter().find(|k| !seen.insert(**k)) {
            return Err(PubMedError::InvalidConfig(format!(
                "keyword {duplicate} listed more than once"
            )));
        }

        Ok(())
    }
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self::new()
    }
}
