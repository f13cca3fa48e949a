//! Settings management utilities

use crate::{ArbitrageError, Result};

/// Configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a currency code (uppercase alphanumeric, at least 2 chars)
    pub fn validate_currency(code: &str) -> Result<()> {
        if code.len() < 2 {
            return Err(ArbitrageError::Config(format!(
                "Currency code '{}' is too short",
                code
            ))
            .into());
        }

        if !code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
            return Err(ArbitrageError::Config(format!(
                "Currency code '{}' must be uppercase alphanumeric",
                code
            ))
            .into());
        }

        Ok(())
    }

    /// Validate a `BASE/QUOTE` pair symbol
    pub fn validate_pair_symbol(symbol: &str) -> Result<()> {
        let (base, quote) = symbol.split_once('/').ok_or_else(|| {
            ArbitrageError::Config(format!("Pair symbol '{}' must be BASE/QUOTE", symbol))
        })?;

        Self::validate_currency(base)?;
        Self::validate_currency(quote)?;

        if base == quote {
            return Err(ArbitrageError::Config(format!(
                "Pair symbol '{}' repeats the same currency",
                symbol
            ))
            .into());
        }

        Ok(())
    }

    /// Validate a strictly positive value
    pub fn validate_positive(value: f64, name: &str) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ArbitrageError::Config(format!("{} must be positive", name)).into());
        }
        Ok(())
    }

    /// Validate a finite, non-negative value
    pub fn validate_non_negative(value: f64, name: &str) -> Result<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(ArbitrageError::Config(format!("{} must be non-negative", name)).into());
        }
        Ok(())
    }

    /// Validate an HTTP(S) URL
    pub fn validate_url(url: &str, name: &str) -> Result<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ArbitrageError::Config(format!("{} is not a valid URL: {}", name, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(
                ArbitrageError::Config(format!("{} must use http or https", name)).into(),
            );
        }

        Ok(())
    }
}

/// Configuration defaults
pub struct ConfigDefaults;

impl ConfigDefaults {
    /// Default minimum profit threshold in percent
    pub const MIN_PROFIT_THRESHOLD: f64 = 0.5;

    /// Default maximum trade amount in base-currency units
    pub const MAX_TRADE_AMOUNT: f64 = 100.0;

    /// Default scan interval in seconds
    pub const SCAN_INTERVAL_SECS: u64 = 5;

    /// Default daily trade cap
    pub const MAX_DAILY_TRADES: u32 = 50;

    /// Default cooldown between executed trades in seconds
    pub const COOLDOWN_SECS: u64 = 60;

    /// Default maximum position size in base-currency units
    pub const MAX_POSITION_SIZE: f64 = 1000.0;

    /// Default connection timeout in seconds
    pub const CONNECTION_TIMEOUT_SECS: u64 = 10;
}
