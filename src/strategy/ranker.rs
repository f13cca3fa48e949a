//! Opportunity filtering and ordering

use crate::strategy::calculator::ArbitrageOpportunity;
use std::cmp::Ordering;

/// Drop opportunities below `min_profit_threshold` (percent) and order the
/// rest by descending profit percentage.
///
/// The sort is stable, so candidates with equal profit keep their discovery
/// order. No side effects.
pub fn rank_opportunities(
    opportunities: Vec<ArbitrageOpportunity>,
    min_profit_threshold: f64,
) -> Vec<ArbitrageOpportunity> {
    let mut ranked: Vec<ArbitrageOpportunity> = opportunities
        .into_iter()
        .filter(|o| o.profit_percentage >= min_profit_threshold)
        .collect();

    ranked.sort_by(|a, b| {
        b.profit_percentage
            .partial_cmp(&a.profit_percentage)
            .unwrap_or(Ordering::Equal)
    });

    ranked
}
