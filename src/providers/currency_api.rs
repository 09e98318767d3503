use super::util::{RetryPolicy, with_retry};
use crate::core::repository::{ApiResponse, CurrencyApiService};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use tracing::{debug, error, instrument};

const LATEST_ENDPOINT: &str = "/v3/latest";

/// HTTP client for the currencyapi "latest" endpoint.
pub struct CurrencyApiClient {
    base_url: String,
    api_key: Option<String>,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl CurrencyApiClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("currex/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            retry: RetryPolicy::default(),
            client,
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl CurrencyApiService for CurrencyApiClient {
    #[instrument(name = "CurrencyApiLatest", skip(self), fields(base_url = %self.base_url))]
    async fn get_latest_exchange_rates(&self) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, LATEST_ENDPOINT);
        debug!("Requesting latest exchange rates from {}", url);

        let response = with_retry(
            || {
                let mut request = self.client.get(&url);
                if let Some(key) = &self.api_key {
                    request = request.header("apikey", key);
                }
                request.send()
            },
            self.retry,
        )
        .await
        .map_err(|e| anyhow!("Request error: {} URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {}", response.status()));
        }

        let text = response
            .text()
            .await
            .context("Failed to get response text")?;

        match serde_json::from_str::<ApiResponse>(&text) {
            Ok(data) => {
                debug!(count = data.data.len(), "Received exchange rates");
                Ok(data)
            }
            Err(e) => {
                error!(
                    error = ?e,
                    response = %text,
                    "Failed to parse exchange rate response"
                );
                Err(anyhow!("Failed to parse exchange rate response: {}", e))
            }
        }
    }
}
