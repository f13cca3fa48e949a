//! Trade execution collaborators

pub mod simulated;

pub use simulated::SimulatedExecutor;

use crate::{strategy::ArbitrageOpportunity, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of one execution attempt as reported by a collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Whether the three-leg transfer completed
    pub succeeded: bool,
    /// Realized profit in base-currency units; zero when the transfer failed
    pub actual_profit: f64,
}

/// Execution collaborator the scanner awaits once per admitted opportunity.
///
/// The scanner treats implementations as black boxes: a returned report with
/// `succeeded == false` and a transport-level `Err` are both failures that
/// skip risk bookkeeping and keep the scan loop alive.
#[async_trait]
pub trait TradeExecutor: Send {
    /// Carry out the three-leg transfer for an admitted opportunity.
    async fn execute(&mut self, opportunity: &ArbitrageOpportunity) -> Result<ExecutionReport>;
}

/// Aggregate execution results
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResults {
    /// Total transfers attempted
    pub total_trades: u64,
    /// Total realized profit across successful transfers
    pub total_profit: f64,
}
