//! Structured telemetry events for external renderers
//!
//! The core emits events through [`TelemetrySink`] and never formats
//! human-readable alert strings itself; a logging or alerting collaborator
//! decides how each event is rendered.

use crate::{connectors::Exchange, strategy::ArbitrageOpportunity, trading::ExecutionReport};
use tracing::{error, info, warn};

/// Structured event sink consumed by the scan scheduler.
pub trait TelemetrySink: Send + Sync {
    /// A ranked opportunity cleared the reporting threshold.
    fn opportunity_found(&self, opportunity: &ArbitrageOpportunity);

    /// An admitted opportunity was handed to the execution collaborator;
    /// `report.succeeded` distinguishes completed from failed transfers.
    fn opportunity_executed(&self, opportunity: &ArbitrageOpportunity, report: &ExecutionReport);

    /// A scan cycle failed at the exchange level.
    fn scan_error(&self, exchange: Exchange, error: &anyhow::Error);
}

/// Default sink: structured `tracing` events with the event name as message.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn opportunity_found(&self, opportunity: &ArbitrageOpportunity) {
        info!(
            exchange = %opportunity.exchange,
            base = %opportunity.base_currency,
            path = %opportunity.path.join("->"),
            profit_percentage = opportunity.profit_percentage,
            profit_amount = opportunity.profit_amount,
            "opportunity_found"
        );
    }

    fn opportunity_executed(&self, opportunity: &ArbitrageOpportunity, report: &ExecutionReport) {
        if report.succeeded {
            info!(
                exchange = %opportunity.exchange,
                path = %opportunity.path.join("->"),
                expected_profit = opportunity.profit_amount,
                actual_profit = report.actual_profit,
                "opportunity_executed"
            );
        } else {
            warn!(
                exchange = %opportunity.exchange,
                path = %opportunity.path.join("->"),
                expected_profit = opportunity.profit_amount,
                "opportunity_executed"
            );
        }
    }

    fn scan_error(&self, exchange: Exchange, error: &anyhow::Error) {
        error!(exchange = %exchange, error = %error, "scan_error");
    }
}
