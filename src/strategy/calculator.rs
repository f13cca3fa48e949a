//! Leg resolution and profit compounding for triangular cycles

use crate::{connectors::Exchange, data::MarketSnapshot, strategy::paths::TriangularPath};
use serde::{Deserialize, Serialize};

/// Fixed notional the calculator compounds through a cycle, in units of the
/// base currency. Independent of any real account balance.
pub const STARTING_NOTIONAL: f64 = 100.0;

/// One resolved leg of a triangular cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegQuote {
    /// The snapshot symbol the leg trades through
    pub symbol: String,
    /// Resolved executable rate; the reciprocal of the opposite side when the
    /// leg is reversed
    pub rate: f64,
    /// Whether the direct symbol was absent and the opposite pair was used
    pub reversed: bool,
    /// 24h volume of the symbol the leg trades through
    pub volume: f64,
}

/// A priced triangular arbitrage candidate.
///
/// Immutable once constructed: a changed snapshot produces a new opportunity,
/// never a mutation of an old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbitrageOpportunity {
    /// Currency the cycle starts and settles in
    pub base_currency: String,
    /// First intermediate currency (leg 1 target)
    pub quote_currency: String,
    /// Second intermediate currency (leg 2 target)
    pub intermediate_currency: String,
    /// Net profit as a percentage of the starting notional
    pub profit_percentage: f64,
    /// Net profit in base-currency units on the starting notional
    pub profit_amount: f64,
    /// The full traversal, first element equal to the last
    pub path: [String; 4],
    /// The three resolved legs in traversal order
    pub legs: [LegQuote; 3],
    /// Venue the cycle was priced on
    pub exchange: Exchange,
    /// Unix timestamp of the scan that produced the snapshot
    pub timestamp: i64,
}

/// How a leg's executable price is taken from the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LegStyle {
    /// Acquiring the target currency: forward price is the ask, reversed
    /// price is `1/bid`
    Buy,
    /// Settling back into the target currency: forward price is the bid,
    /// reversed price is `1/ask`
    Sell,
}

/// Resolve the executable rate for exchanging `from` into `to`.
///
/// Prefers the direct symbol `from/to`; falls back to the reciprocal of the
/// opposite side of `to/from`. Returns `None` when neither symbol is quoted
/// or the resolved rate is unusable.
fn resolve_leg(
    from: &str,
    to: &str,
    style: LegStyle,
    snapshot: &MarketSnapshot,
) -> Option<LegQuote> {
    let direct = format!("{}/{}", from, to);
    if let Some(pair) = snapshot.get(&direct) {
        let rate = match style {
            LegStyle::Buy => pair.ask,
            LegStyle::Sell => pair.bid,
        };
        return usable(rate).then(|| LegQuote {
            symbol: direct,
            rate,
            reversed: false,
            volume: pair.volume,
        });
    }

    let opposite = format!("{}/{}", to, from);
    if let Some(pair) = snapshot.get(&opposite) {
        let rate = match style {
            LegStyle::Buy => 1.0 / pair.bid,
            LegStyle::Sell => 1.0 / pair.ask,
        };
        return usable(rate).then(|| LegQuote {
            symbol: opposite,
            rate,
            reversed: true,
            volume: pair.volume,
        });
    }

    None
}

// A zero bid or ask turns the reciprocal into infinity; reject the leg
// instead of letting it poison the compounded amount.
fn usable(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

/// Price one triangular cycle against a snapshot.
///
/// Pure: identical snapshot and path always yield the identical result. An
/// unresolvable leg or a non-positive profit returns `None` — both are
/// ordinary outcomes, not errors.
pub fn evaluate_path(
    path: &TriangularPath,
    snapshot: &MarketSnapshot,
    exchange: Exchange,
    timestamp: i64,
) -> Option<ArbitrageOpportunity> {
    let leg1 = resolve_leg(path.base(), path.first(), LegStyle::Buy, snapshot)?;
    let leg2 = resolve_leg(path.first(), path.second(), LegStyle::Buy, snapshot)?;
    let leg3 = resolve_leg(path.second(), path.base(), LegStyle::Sell, snapshot)?;

    let mut amount = STARTING_NOTIONAL;
    for leg in [&leg1, &leg2, &leg3] {
        amount = if leg.reversed {
            amount / leg.rate
        } else {
            amount * leg.rate
        };
    }

    if !amount.is_finite() {
        return None;
    }

    let profit_amount = amount - STARTING_NOTIONAL;
    let profit_percentage = profit_amount / STARTING_NOTIONAL * 100.0;

    if profit_percentage <= 0.0 {
        return None;
    }

    Some(ArbitrageOpportunity {
        base_currency: path.base().to_string(),
        quote_currency: path.first().to_string(),
        intermediate_currency: path.second().to_string(),
        profit_percentage,
        profit_amount,
        path: path.cycle.clone(),
        legs: [leg1, leg2, leg3],
        exchange,
        timestamp,
    })
}
