//! Market data types shared across the scanner pipeline

use crate::{ArbitrageError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-of-book quote for a single trading pair.
///
/// Created fresh for every scan cycle and discarded with the snapshot that
/// produced it. Consumers must not assume `bid <= price <= ask` holds even on
/// well-formed venues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingPair {
    /// Pair symbol in `BASE/QUOTE` form
    pub symbol: String,
    /// Base currency code (numerator)
    pub base: String,
    /// Quote currency code (denominator)
    pub quote: String,
    /// Last traded price
    pub price: f64,
    /// 24h base volume
    pub volume: f64,
    /// Best bid price
    pub bid: f64,
    /// Best ask price
    pub ask: f64,
}

impl TradingPair {
    /// Build a pair quote from a `BASE/QUOTE` symbol and top-of-book numbers.
    pub fn from_symbol(symbol: &str, price: f64, volume: f64, bid: f64, ask: f64) -> Result<Self> {
        let (base, quote) = split_symbol(symbol)?;
        Ok(Self {
            symbol: symbol.to_string(),
            base,
            quote,
            price,
            volume,
            bid,
            ask,
        })
    }

    /// Whether all numeric fields are finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        [self.price, self.volume, self.bid, self.ask]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Split a `BASE/QUOTE` symbol into its currency codes.
pub fn split_symbol(symbol: &str) -> Result<(String, String)> {
    match symbol.split_once('/') {
        Some((base, quote)) if base.len() >= 2 && quote.len() >= 2 => {
            Ok((base.to_string(), quote.to_string()))
        }
        _ => Err(ArbitrageError::DataParsing(format!("Invalid pair symbol: {}", symbol)).into()),
    }
}

/// Immutable per-scan mapping from pair symbol to quote.
///
/// Scoped to one exchange and one scan cycle: built at scan start, read-only
/// for the remainder of that cycle, replaced wholesale on the next one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pairs: HashMap<String, TradingPair>,
}

impl MarketSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair quote, replacing any previous quote for the same symbol.
    pub fn insert(&mut self, pair: TradingPair) {
        self.pairs.insert(pair.symbol.clone(), pair);
    }

    /// Look up a quote by `BASE/QUOTE` symbol.
    pub fn get(&self, symbol: &str) -> Option<&TradingPair> {
        self.pairs.get(symbol)
    }

    /// Whether a symbol is quotable in this snapshot.
    pub fn contains(&self, symbol: &str) -> bool {
        self.pairs.contains_key(symbol)
    }

    /// Number of quoted pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the snapshot holds no quotes at all.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over all quoted pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &TradingPair)> {
        self.pairs.iter()
    }
}
