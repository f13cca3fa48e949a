//! Binance public REST ticker client

use crate::{
    config::EndpointConfig,
    connectors::{Exchange, ExchangeClient},
    data::TradingPair,
    ArbitrageError, Result,
};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_REST_API_URL: &str = "https://api.binance.com";

/// Binance exchange ticker client
pub struct BinanceClient {
    base_url: String,
    client: reqwest::Client,
}

/// 24h ticker payload, reduced to the fields the snapshot needs
#[derive(Debug, Deserialize)]
struct BinanceTicker {
    #[serde(rename = "lastPrice")]
    last_price: String,
    #[serde(rename = "bidPrice")]
    bid_price: String,
    #[serde(rename = "askPrice")]
    ask_price: String,
    volume: String,
}

impl BinanceClient {
    /// Create a new Binance client from endpoint settings.
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

    // Binance quotes "BTC/USDT" as "BTCUSDT"
    fn venue_symbol(symbol: &str) -> String {
        symbol.replace('/', "")
    }

    fn parse_field(value: &str, name: &str) -> Result<f64> {
        value
            .parse::<f64>()
            .map_err(|e| ArbitrageError::DataParsing(format!("Invalid {}: {}", name, e)).into())
    }
}

#[async_trait]
impl ExchangeClient for BinanceClient {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Option<TradingPair>> {
        let url = format!(
            "{}/api/v3/ticker/24hr?symbol={}",
            self.base_url,
            Self::venue_symbol(symbol)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ArbitrageError::Connection(format!("HTTP request failed: {}", e)))?;

        // Binance answers 400 for symbols it does not list
        if response.status() == reqwest::StatusCode::BAD_REQUEST
            || response.status() == reqwest::StatusCode::NOT_FOUND
        {
            debug!(exchange = %self.exchange(), symbol, "symbol not listed");
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(ArbitrageError::Connection(format!(
                "HTTP request failed with status: {}",
                response.status()
            ))
            .into());
        }

        let ticker: BinanceTicker = response
            .json()
            .await
            .map_err(|e| ArbitrageError::DataParsing(format!("Failed to parse ticker: {}", e)))?;

        let pair = TradingPair::from_symbol(
            symbol,
            Self::parse_field(&ticker.last_price, "last price")?,
            Self::parse_field(&ticker.volume, "volume")?,
            Self::parse_field(&ticker.bid_price, "bid price")?,
            Self::parse_field(&ticker.ask_price, "ask price")?,
        )?;

        Ok(Some(pair))
    }

    async fn close(&self) -> Result<()> {
        // reqwest clients hold no per-venue session state
        Ok(())
    }
}
