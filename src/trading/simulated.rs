//! Simulated (dry-run) trade execution

use crate::{
    strategy::ArbitrageOpportunity,
    trading::{ExecutionReport, ExecutionResults, TradeExecutor},
    Result,
};
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Tuning knobs for the simulation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// Sleep for `transfer_delay_ms` per execution to mimic venue latency
    pub simulate_delays: bool,
    /// Simulated three-leg transfer duration in milliseconds
    pub transfer_delay_ms: u64,
    /// Probability in `[0, 1]` that a transfer is reported as failed
    pub rejection_probability: f64,
    /// Half-width of the multiplicative jitter applied to realized profit
    pub profit_jitter: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulate_delays: false,
            transfer_delay_ms: 1_000,
            rejection_probability: 0.0,
            profit_jitter: 0.05,
        }
    }
}

/// One simulated transfer, kept for post-run inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedFill {
    /// Synthetic fill identifier
    pub id: Uuid,
    /// The traversal that was "executed"
    pub path: [String; 4],
    /// Profit the opportunity promised
    pub expected_profit: f64,
    /// Profit the simulation realized
    pub actual_profit: f64,
    /// Whether the simulated transfer completed
    pub succeeded: bool,
    /// Unix timestamp of the execution
    pub timestamp: i64,
}

/// Dry-run execution collaborator.
///
/// Never touches a venue: it sleeps for a configurable transfer latency,
/// optionally rejects, and reports the expected profit with a small random
/// jitter as realized.
#[derive(Debug, Default)]
pub struct SimulatedExecutor {
    config: SimulationConfig,
    history: Vec<SimulatedFill>,
}

impl SimulatedExecutor {
    /// Create an executor with default simulation settings.
    pub fn new() -> Self {
        Self::with_config(SimulationConfig::default())
    }

    /// Create an executor with explicit simulation settings.
    pub fn with_config(config: SimulationConfig) -> Self {
        Self {
            config,
            history: Vec::new(),
        }
    }

    /// All simulated fills in execution order.
    pub fn history(&self) -> &[SimulatedFill] {
        &self.history
    }

    /// Aggregate results over the executor's lifetime.
    pub fn get_results(&self) -> ExecutionResults {
        ExecutionResults {
            total_trades: self.history.len() as u64,
            total_profit: self
                .history
                .iter()
                .filter(|fill| fill.succeeded)
                .map(|fill| fill.actual_profit)
                .sum(),
        }
    }

    /// Clear the execution history.
    pub fn reset(&mut self) {
        self.history.clear();
    }
}

#[async_trait]
impl TradeExecutor for SimulatedExecutor {
    async fn execute(&mut self, opportunity: &ArbitrageOpportunity) -> Result<ExecutionReport> {
        debug!(
            exchange = %opportunity.exchange,
            path = %opportunity.path.join(" -> "),
            expected_profit = opportunity.profit_amount,
            "simulating three-leg transfer"
        );

        if self.config.simulate_delays {
            tokio::time::sleep(Duration::from_millis(self.config.transfer_delay_ms)).await;
        }

        let mut rng = rand::thread_rng();

        let rejected = self.config.rejection_probability > 0.0
            && rng.gen::<f64>() < self.config.rejection_probability;

        let actual_profit = if rejected {
            0.0
        } else if self.config.profit_jitter > 0.0 {
            let jitter =
                rng.gen_range(1.0 - self.config.profit_jitter..1.0 + self.config.profit_jitter);
            opportunity.profit_amount * jitter
        } else {
            opportunity.profit_amount
        };

        let fill = SimulatedFill {
            id: Uuid::new_v4(),
            path: opportunity.path.clone(),
            expected_profit: opportunity.profit_amount,
            actual_profit,
            succeeded: !rejected,
            timestamp: chrono::Utc::now().timestamp(),
        };

        info!(
            fill_id = %fill.id,
            succeeded = fill.succeeded,
            actual_profit = fill.actual_profit,
            "simulated execution complete"
        );

        self.history.push(fill);

        Ok(ExecutionReport {
            succeeded: !rejected,
            actual_profit,
        })
    }
}
