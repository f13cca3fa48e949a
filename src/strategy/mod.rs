//! Opportunity detection and risk gating

pub mod calculator;
pub mod graph;
pub mod paths;
pub mod ranker;
pub mod risk_manager;
pub mod scanner;

pub use calculator::{evaluate_path, ArbitrageOpportunity, LegQuote, STARTING_NOTIONAL};
pub use graph::{CurrencyGraph, GraphEdge};
pub use paths::{generate_paths, TriangularPath};
pub use ranker::rank_opportunities;
pub use risk_manager::{DenialReason, RiskGate, RiskState, TradeDecision};
pub use scanner::{ArbitrageScanner, ScannerHandle, ScannerState, ScannerStatistics};
