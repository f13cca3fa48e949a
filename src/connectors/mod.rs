//! Exchange client implementations

pub mod binance;
pub mod kucoin;
pub mod traits;

pub use binance::BinanceClient;
pub use kucoin::KucoinClient;
pub use traits::ExchangeClient;

use crate::{config::ExchangeListConfig, ArbitrageError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported exchanges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// Binance exchange
    Binance,
    /// KuCoin exchange
    Kucoin,
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exchange::Binance => write!(f, "binance"),
            Exchange::Kucoin => write!(f, "kucoin"),
        }
    }
}

impl std::str::FromStr for Exchange {
    type Err = ArbitrageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "binance" => Ok(Exchange::Binance),
            "kucoin" => Ok(Exchange::Kucoin),
            _ => Err(ArbitrageError::Config(format!("Unknown exchange: {}", s))),
        }
    }
}

/// Client factory for creating exchange ticker clients
pub struct ClientFactory;

impl ClientFactory {
    /// Create a ticker client for the specified exchange.
    pub fn create(
        exchange: Exchange,
        config: &ExchangeListConfig,
    ) -> crate::Result<Box<dyn ExchangeClient>> {
        match exchange {
            Exchange::Binance => {
                let client = BinanceClient::new(&config.binance)?;
                Ok(Box::new(client))
            }
            Exchange::Kucoin => {
                let client = KucoinClient::new(&config.kucoin)?;
                Ok(Box::new(client))
            }
        }
    }
}
