//! KuCoin public REST ticker client

use crate::{
    config::EndpointConfig,
    connectors::{Exchange, ExchangeClient},
    data::TradingPair,
    ArbitrageError, Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_REST_API_URL: &str = "https://api.kucoin.com";

/// KuCoin exchange ticker client
pub struct KucoinClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct KucoinResponse {
    code: String,
    data: Option<KucoinStats>,
}

/// 24h stats payload; every field is null for unlisted symbols
#[derive(Debug, Deserialize)]
struct KucoinStats {
    last: Option<String>,
    buy: Option<String>,
    sell: Option<String>,
    vol: Option<String>,
}

impl KucoinClient {
    /// Create a new KuCoin client from endpoint settings.
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base_url = if config.rest_api_url.is_empty() {
            DEFAULT_REST_API_URL.to_string()
        } else {
            config.rest_api_url.trim_end_matches('/').to_string()
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.connection_timeout_secs))
            .build()
            .map_err(|e| ArbitrageError::Connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    // KuCoin quotes "BTC/USDT" as "BTC-USDT"
    fn venue_symbol(symbol: &str) -> String {
        symbol.replace('/', "-")
    }

    fn parse_field(value: &str, name: &str) -> Result<f64> {
        value
            .parse::<f64>()
            .map_err(|e| ArbitrageError::DataParsing(format!("Invalid {}: {}", name, e)).into())
    }
}

#[async_trait]
impl ExchangeClient for KucoinClient {
    fn exchange(&self) -> Exchange {
        Exchange::Kucoin
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Option<TradingPair>> {
        let url = format!(
            "{}/api/v1/market/stats?symbol={}",
            self.base_url,
            Self::venue_symbol(symbol)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ArbitrageError::Connection(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ArbitrageError::Connection(format!(
                "HTTP request failed with status: {}",
                response.status()
            ))
            .into());
        }

        let body: KucoinResponse = response
            .json()
            .await
            .map_err(|e| ArbitrageError::DataParsing(format!("Failed to parse stats: {}", e)))?;

        let stats = match body.data {
            Some(stats) if body.code == "200000" => stats,
            _ => {
                debug!(exchange = %self.exchange(), symbol, code = %body.code, "symbol not listed");
                return Ok(None);
            }
        };

        // KuCoin serves the stats envelope with null fields for dead symbols
        let (last, buy, sell, vol) = match (stats.last, stats.buy, stats.sell, stats.vol) {
            (Some(last), Some(buy), Some(sell), Some(vol)) => (last, buy, sell, vol),
            _ => {
                debug!(exchange = %self.exchange(), symbol, "symbol not quoted");
                return Ok(None);
            }
        };

        let pair = TradingPair::from_symbol(
            symbol,
            Self::parse_field(&last, "last price")?,
            Self::parse_field(&vol, "volume")?,
            Self::parse_field(&buy, "bid price")?,
            Self::parse_field(&sell, "ask price")?,
        )?;

        Ok(Some(pair))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
