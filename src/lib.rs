//! Triangular Arbitrage Scanner
//!
//! Detects triangular arbitrage cycles (base -> A -> B -> base) from per-scan
//! market snapshots, prices each leg respecting quotation direction, and gates
//! execution behind configurable risk limits.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod connectors;
pub mod data;
pub mod strategy;
pub mod trading;
pub mod utils;

// Re-export commonly used types
pub use config::ArbitrageConfig;
pub use connectors::{Exchange, ExchangeClient};
pub use data::{MarketSnapshot, TradingPair};
pub use strategy::{ArbitrageOpportunity, ArbitrageScanner, RiskGate, RiskState};
pub use trading::{ExecutionReport, SimulatedExecutor, TradeExecutor};

/// Result type used throughout the application
pub type Result<T> = anyhow::Result<T>;

/// Common error types for the arbitrage system
#[derive(thiserror::Error, Debug)]
pub enum ArbitrageError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    DataParsing(String),

    /// Trading error
    #[error("Trading error: {0}")]
    Trading(String),

    /// Risk management error
    #[error("Risk management error: {0}")]
    RiskManagement(String),

    /// Timeout error
    #[error("Timeout error: {0}")]
    Timeout(String),
}

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
