//! GeckoTerminal API Client
//!
//! Fetches hourly OHLCV candles for a pool, ending at the anchor tweet.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::{Client, StatusCode};

use super::types::{parse_ohlcv, OhlcvResponse};
use crate::domain::{PriceSeries, MAX_PRICE_POINTS};
use crate::ports::{PortError, PortResult, PriceSource};

/// GeckoTerminal client configuration
#[derive(Debug, Clone)]
pub struct GeckoTerminalConfig {
    /// Base URL, e.g. https://api.geckoterminal.com/api/v2
    pub api_base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GeckoTerminalConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.geckoterminal.com/api/v2".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Map a stored chain name to GeckoTerminal's network id
pub fn network_code(chain: &str) -> String {
    let chain = chain.trim().to_lowercase();
    match chain.as_str() {
        "ethereum" => "eth".to_string(),
        "binance" => "bsc".to_string(),
        "polygon" => "polygon_pos".to_string(),
        "avalanche" => "avax".to_string(),
        _ => chain,
    }
}

#[derive(Debug, Clone)]
pub struct GeckoTerminalClient {
    config: GeckoTerminalConfig,
    http: Client,
}

impl GeckoTerminalClient {
    pub fn with_config(config: GeckoTerminalConfig) -> Result<Self, PortError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| PortError::Communication(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    fn ohlcv_url(&self, network: &str, pair_id: &str) -> String {
        format!(
            "{}/networks/{}/pools/{}/ohlcv/hour",
            self.config.api_base_url.trim_end_matches('/'),
            network,
            pair_id
        )
    }
}

#[async_trait]
impl PriceSource for GeckoTerminalClient {
    async fn fetch_price_series(
        &self,
        chain: &str,
        pair_id: &str,
        anchor: NaiveDateTime,
    ) -> PortResult<PriceSeries> {
        let network = network_code(chain);
        let before = anchor.and_utc().timestamp();
        tracing::info!("Fetching OHLCV data for chain: {}, pair: {}", network, pair_id);

        let response = self
            .http
            .get(self.ohlcv_url(&network, pair_id))
            .query(&[
                ("aggregate", "1".to_string()),
                ("before_timestamp", before.to_string()),
                ("limit", MAX_PRICE_POINTS.to_string()),
                ("currency", "usd".to_string()),
                ("include_empty_intervals", "false".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(PortError::RateLimitExceeded);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("GeckoTerminal error response ({}): {}", status, body);
            return Err(PortError::Communication(format!("HTTP {}: {}", status, body)));
        }

        let body: OhlcvResponse = response.json().await?;
        let points = parse_ohlcv(&body.data.attributes.ohlcv_list);
        let series = PriceSeries::from_points(points, anchor);
        tracing::info!("Successfully fetched {} OHLCV data points", series.len());

        Ok(series)
    }
}
