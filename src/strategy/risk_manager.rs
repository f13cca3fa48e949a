//! Risk-gated admission control for trade execution

use crate::{
    config::{ArbitrageConfig, RiskConfig},
    strategy::calculator::ArbitrageOpportunity,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of the available balance a single position may consume.
const BALANCE_FRACTION: f64 = 0.10;

/// Mutable risk counters — the only state that outlives a scan cycle.
///
/// Mutated exclusively through [`RiskGate::record_trade`] and
/// [`RiskState::roll_day`]; the gate's decision function never writes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskState {
    /// Trades executed since the last day rollover
    pub daily_trade_count: u32,
    /// Realized profit since the last day rollover, in base-currency units
    pub daily_profit: f64,
    /// Unix timestamp of the last executed trade
    pub last_trade_at: Option<i64>,
}

impl RiskState {
    /// Fresh state with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Day-boundary rollover: zero the daily counters.
    ///
    /// Owned by the gate's caller; the cooldown timestamp survives the
    /// rollover since it is not a daily quantity.
    pub fn roll_day(&mut self) {
        self.daily_trade_count = 0;
        self.daily_profit = 0.0;
    }
}

/// Why the gate refused an opportunity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DenialReason {
    /// The daily trade cap is exhausted
    DailyLimit,
    /// The cooldown interval since the last trade has not elapsed
    Cooldown,
    /// The opportunity's notional profit exceeds the position cap
    PositionTooLarge,
    /// Profit percentage is below the configured minimum
    BelowThreshold,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::DailyLimit => write!(f, "daily limit"),
            DenialReason::Cooldown => write!(f, "cooldown"),
            DenialReason::PositionTooLarge => write!(f, "position too large"),
            DenialReason::BelowThreshold => write!(f, "below threshold"),
        }
    }
}

/// Admission decision for one opportunity.
///
/// Denial is an ordinary decision value, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeDecision {
    /// The opportunity may be handed to the execution collaborator
    Allowed,
    /// The opportunity must not be executed, with the first violated check
    Denied(DenialReason),
}

impl TradeDecision {
    /// Whether execution may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, TradeDecision::Allowed)
    }
}

/// Stateless admission control over `(opportunity, RiskState, limits)`.
///
/// Owns no mutable state itself, so multiple scanner instances can gate
/// independently against their own [`RiskState`] values.
#[derive(Debug, Clone)]
pub struct RiskGate {
    risk: RiskConfig,
    min_profit_threshold: f64,
    max_trade_amount: f64,
}

impl RiskGate {
    /// Build a gate from the scanner configuration.
    pub fn new(config: &ArbitrageConfig) -> Self {
        Self {
            risk: config.risk.clone(),
            min_profit_threshold: config.scanner.min_profit_threshold,
            max_trade_amount: config.execution.max_trade_amount,
        }
    }

    /// Decide whether `opportunity` may be executed right now.
    ///
    /// Checks run in a fixed order and the first violation wins: daily cap,
    /// cooldown, position size, minimum profit.
    pub fn evaluate(
        &self,
        opportunity: &ArbitrageOpportunity,
        state: &RiskState,
        now: i64,
    ) -> TradeDecision {
        if state.daily_trade_count >= self.risk.max_daily_trades {
            return TradeDecision::Denied(DenialReason::DailyLimit);
        }

        if let Some(last_trade_at) = state.last_trade_at {
            if now.saturating_sub(last_trade_at) < self.risk.cooldown_secs as i64 {
                return TradeDecision::Denied(DenialReason::Cooldown);
            }
        }

        if opportunity.profit_amount > self.risk.max_position_size {
            return TradeDecision::Denied(DenialReason::PositionTooLarge);
        }

        if opportunity.profit_percentage < self.min_profit_threshold {
            return TradeDecision::Denied(DenialReason::BelowThreshold);
        }

        TradeDecision::Allowed
    }

    /// Position size for a trade given the available balance: the smallest of
    /// the configured per-trade maximum, a tenth of the balance, and the
    /// position cap, floored at zero.
    pub fn position_size(&self, available_balance: f64) -> f64 {
        self.max_trade_amount
            .min(available_balance * BALANCE_FRACTION)
            .min(self.risk.max_position_size)
            .max(0.0)
    }

    /// Record a confirmed execution.
    ///
    /// Only called once the execution collaborator reports success; denied or
    /// failed trades must leave the state untouched.
    pub fn record_trade(&self, state: &mut RiskState, actual_profit: f64, now: i64) {
        state.daily_trade_count += 1;
        state.daily_profit += actual_profit;
        state.last_trade_at = Some(now);
    }
}
