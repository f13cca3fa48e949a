//! Shared fixtures for integration tests

use async_trait::async_trait;
use std::collections::HashMap;
use triangular_arbitrage::{
    config::ArbitrageConfig,
    connectors::{Exchange, ExchangeClient},
    data::{MarketSnapshot, TradingPair},
    trading::simulated::{SimulatedExecutor, SimulationConfig},
    Result,
};

/// Quote fixture: (symbol, price, volume, bid, ask)
pub type QuoteFixture = (&'static str, f64, f64, f64, f64);

/// Six-pair market shaped like the reference venue's spot book.
pub const MARKET: &[QuoteFixture] = &[
    ("BTC/USDT", 43250.0, 1250.5, 43240.0, 43260.0),
    ("ETH/USDT", 2580.0, 8950.2, 2578.0, 2582.0),
    ("BNB/USDT", 315.5, 2150.8, 315.2, 315.8),
    ("BTC/ETH", 16.76, 125.3, 16.75, 16.77),
    ("BTC/BNB", 137.0, 89.7, 136.8, 137.2),
    ("ETH/BNB", 8.18, 456.2, 8.17, 8.19),
];

/// Forward-quoted triangle that compounds 100 USDT into 104 USDT.
pub const PROFITABLE_TRIANGLE: &[QuoteFixture] = &[
    ("USDT/BTC", 0.000025, 500.0, 0.000024, 0.000025),
    ("BTC/ETH", 16.0, 125.3, 15.9, 16.0),
    ("ETH/USDT", 2605.0, 8950.2, 2600.0, 2610.0),
];

/// Build a snapshot from quote fixtures.
pub fn snapshot(quotes: &[QuoteFixture]) -> MarketSnapshot {
    let mut snapshot = MarketSnapshot::new();
    for (symbol, price, volume, bid, ask) in quotes {
        snapshot.insert(TradingPair::from_symbol(symbol, *price, *volume, *bid, *ask).unwrap());
    }
    snapshot
}

/// Scanner configuration pointed at the given pairs with trading enabled.
pub fn config_for(pairs: &[QuoteFixture]) -> ArbitrageConfig {
    let mut config = ArbitrageConfig::default();
    config.scanner.base_currencies = vec!["USDT".to_string()];
    config.scanner.trading_pairs = pairs.iter().map(|(s, ..)| s.to_string()).collect();
    config.scanner.min_profit_threshold = 0.5;
    config.execution.enable_trading = true;
    config
}

/// Deterministic executor: no jitter, no rejections, no delays.
pub fn quiet_executor() -> SimulatedExecutor {
    SimulatedExecutor::with_config(SimulationConfig {
        profit_jitter: 0.0,
        ..SimulationConfig::default()
    })
}

/// In-memory exchange client serving fixed quotes, with optional per-symbol
/// transport failures.
pub struct StaticClient {
    quotes: HashMap<String, TradingPair>,
    failing: Vec<String>,
}

impl StaticClient {
    /// Client answering with the given quote fixtures.
    pub fn new(quotes: &[QuoteFixture]) -> Self {
        let mut map = HashMap::new();
        for (symbol, price, volume, bid, ask) in quotes {
            map.insert(
                symbol.to_string(),
                TradingPair::from_symbol(symbol, *price, *volume, *bid, *ask).unwrap(),
            );
        }
        Self {
            quotes: map,
            failing: Vec::new(),
        }
    }

    /// Make fetches for `symbol` fail at the transport level.
    pub fn failing_on(mut self, symbol: &str) -> Self {
        self.failing.push(symbol.to_string());
        self
    }
}

#[async_trait]
impl ExchangeClient for StaticClient {
    fn exchange(&self) -> Exchange {
        Exchange::Binance
    }

    async fn fetch_ticker(&self, symbol: &str) -> Result<Option<TradingPair>> {
        if self.failing.iter().any(|s| s == symbol) {
            return Err(
                triangular_arbitrage::ArbitrageError::Connection("fetch failed".to_string()).into(),
            );
        }
        Ok(self.quotes.get(symbol).cloned())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
