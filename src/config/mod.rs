//! Configuration management module

pub mod settings;

pub use settings::*;

use crate::{ArbitrageError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the arbitrage scanner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrageConfig {
    /// Scanner configuration
    pub scanner: ScannerConfig,
    /// Execution configuration
    pub execution: ExecutionConfig,
    /// Risk management configuration
    pub risk: RiskConfig,
    /// Exchange configuration
    pub exchanges: ExchangeListConfig,
}

/// Scanner-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Base currencies to anchor triangular cycles on
    pub base_currencies: Vec<String>,
    /// Trading-pair symbols fetched each scan cycle (`BASE/QUOTE` form)
    pub trading_pairs: Vec<String>,
    /// Minimum profit percentage for an opportunity to be reported
    pub min_profit_threshold: f64,
    /// Seconds to sleep between scan cycles
    pub scan_interval_secs: u64,
}

/// Execution configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Whether admitted opportunities are handed to the executor at all
    pub enable_trading: bool,
    /// Maximum notional per trade, in base-currency units
    pub max_trade_amount: f64,
}

/// Risk management configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Maximum number of executed trades per day
    pub max_daily_trades: u32,
    /// Minimum seconds between executed trades
    pub cooldown_secs: u64,
    /// Maximum position size in base-currency units
    pub max_position_size: f64,
}

/// Exchange list configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExchangeListConfig {
    /// Enabled exchanges, scanned sequentially in this order
    pub enabled: Vec<String>,
    /// Binance endpoint settings
    pub binance: EndpointConfig,
    /// KuCoin endpoint settings
    pub kucoin: EndpointConfig,
}

/// Per-exchange endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// REST API base URL; empty string selects the venue default
    pub rest_api_url: String,
    /// Connection timeout in seconds
    pub connection_timeout_secs: u64,
}

impl ArbitrageConfig {
    /// Load configuration from a TOML file.
    ///
    /// Unknown keys are ignored; every recognized option falls back to its
    /// default when absent.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ArbitrageError::Config(format!("Failed to read config file: {}", e)))?;

        let config: ArbitrageConfig = toml::from_str(&content)
            .map_err(|e| ArbitrageError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Validate the configuration once at startup.
    pub fn validate(&self) -> Result<()> {
        if self.scanner.base_currencies.is_empty() {
            return Err(
                ArbitrageError::Config("At least one base currency is required".to_string()).into(),
            );
        }

        for currency in &self.scanner.base_currencies {
            ConfigValidator::validate_currency(currency)?;
        }

        if self.scanner.trading_pairs.is_empty() {
            return Err(
                ArbitrageError::Config("At least one trading pair is required".to_string()).into(),
            );
        }

        for symbol in &self.scanner.trading_pairs {
            ConfigValidator::validate_pair_symbol(symbol)?;
        }

        if self.scanner.scan_interval_secs == 0 {
            return Err(
                ArbitrageError::Config("Scan interval must be greater than 0".to_string()).into(),
            );
        }

        ConfigValidator::validate_non_negative(self.scanner.min_profit_threshold, "min_profit_threshold")?;
        ConfigValidator::validate_positive(self.execution.max_trade_amount, "max_trade_amount")?;
        ConfigValidator::validate_positive(self.risk.max_position_size, "max_position_size")?;

        if self.risk.max_daily_trades == 0 {
            return Err(
                ArbitrageError::Config("Max daily trades must be greater than 0".to_string()).into(),
            );
        }

        if self.exchanges.enabled.is_empty() {
            return Err(
                ArbitrageError::Config("At least one exchange must be enabled".to_string()).into(),
            );
        }

        for name in &self.exchanges.enabled {
            name.parse::<crate::connectors::Exchange>()?;
        }

        for endpoint in [&self.exchanges.binance, &self.exchanges.kucoin] {
            if !endpoint.rest_api_url.is_empty() {
                ConfigValidator::validate_url(&endpoint.rest_api_url, "rest_api_url")?;
            }
        }

        Ok(())
    }
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            scanner: ScannerConfig::default(),
            execution: ExecutionConfig::default(),
            risk: RiskConfig::default(),
            exchanges: ExchangeListConfig::default(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            base_currencies: vec!["USDT".to_string(), "BTC".to_string(), "ETH".to_string()],
            trading_pairs: vec![
                "BTC/USDT".to_string(),
                "ETH/USDT".to_string(),
                "BNB/USDT".to_string(),
                "BTC/ETH".to_string(),
                "BTC/BNB".to_string(),
                "ETH/BNB".to_string(),
            ],
            min_profit_threshold: ConfigDefaults::MIN_PROFIT_THRESHOLD,
            scan_interval_secs: ConfigDefaults::SCAN_INTERVAL_SECS,
        }
    }
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            enable_trading: false,
            max_trade_amount: ConfigDefaults::MAX_TRADE_AMOUNT,
        }
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            max_daily_trades: ConfigDefaults::MAX_DAILY_TRADES,
            cooldown_secs: ConfigDefaults::COOLDOWN_SECS,
            max_position_size: ConfigDefaults::MAX_POSITION_SIZE,
        }
    }
}

impl Default for ExchangeListConfig {
    fn default() -> Self {
        Self {
            enabled: vec!["binance".to_string()],
            binance: EndpointConfig::default(),
            kucoin: EndpointConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            rest_api_url: String::new(),
            connection_timeout_secs: ConfigDefaults::CONNECTION_TIMEOUT_SECS,
        }
    }
}
