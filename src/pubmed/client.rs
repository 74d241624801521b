use crate::config::ClientConfig;
use crate::error::{PubMedError, Result};
use crate::keywords::KeywordCombination;
use crate::pubmed::models::SearchOutcome;
use crate::pubmed::responses::parse_search_outcome;
use crate::query::{DateRange, build_query_url};
use crate::rate_limit::RateLimiter;
use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};

/// Client for the PubMed ESearch endpoint
///
/// Every request goes through the client's [`RateLimiter`]; clones share it.
#[derive(Clone)]
pub struct PubMedClient {
    client: Client,
    rate_limiter: RateLimiter,
    config: ClientConfig,
}

impl PubMedClient {
    /// Create a client with default NCBI settings
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::new())
    }

    /// Create a client with custom configuration
    ///
    /// # Example
    ///
    /// ```
    /// use multiomics_survey::{ClientConfig, PubMedClient};
    ///
    /// let config = ClientConfig::new()
    ///     .with_email("researcher@university.edu")
    ///     .with_tool("omics-trends");
    ///
    /// let client = PubMedClient::with_config(config)?;
    /// # Ok::<(), multiomics_survey::PubMedError>(())
    /// ```
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.effective_user_agent())
            .build()?;

        Ok(Self::with_client(client, config))
    }

    /// Create a client around an existing reqwest client
    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        let rate_limiter = config.create_rate_limiter();
        Self {
            client,
            rate_limiter,
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }

    /// Search one keyword combination over a date range
    #[instrument(skip(self, combination, range), fields(combination = %combination, range = %range))]
    pub async fn search_combination(
        &self,
        combination: &KeywordCombination,
        range: &DateRange,
    ) -> Result<SearchOutcome> {
        let url = build_query_url(&self.config, combination, range);
        self.search_ids(&url).await
    }

    /// Execute a prepared ESearch URL and extract the study identifiers
    ///
    /// A server total larger than the applied result cap is logged as a
    /// warning; the truncated identifier list is still returned.
    ///
    /// # Errors
    ///
    /// * `PubMedError::RequestError` - If the HTTP request fails
    /// * `PubMedError::ApiError` - On a non-success status or an NCBI error body
    /// * `PubMedError::XmlError` - If the response is not valid ESearch XML
    #[instrument(skip(self, url))]
    pub async fn search_ids(&self, url: &str) -> Result<SearchOutcome> {
        let response = self.make_request(url).await?;
        let body = response.text().await?;

        let outcome = parse_search_outcome(&body)?;
        if outcome.is_truncated() {
            warn!(
                count = outcome.count,
                ret_max = outcome.ret_max,
                url = %url,
                "Query returned more results than the result cap, identifiers are truncated"
            );
        }

        debug!(ids_returned = outcome.ids.len(), "Search completed");
        Ok(outcome)
    }

    /// Rate-limited GET that maps non-success statuses to `ApiError`
    pub(crate) async fn make_request(&self, url: &str) -> Result<Response> {
        self.rate_limiter.wait_if_needed().await;

        debug!("Making API request to: {}", url);
        let sent = self.client.get(url).send().await;
        self.rate_limiter.record_request();
        let response = sent?;

        if !response.status().is_success() {
            warn!("API request failed with status: {}", response.status());
            return Err(PubMedError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        Ok(response)
    }
}
