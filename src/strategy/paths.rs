//! Triangular cycle enumeration

use crate::{data::MarketSnapshot, strategy::graph::CurrencyGraph};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed three-leg traversal `[base, A, B, base]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriangularPath {
    /// The four currency codes of the cycle; first and last are equal
    pub cycle: [String; 4],
}

impl TriangularPath {
    /// Construct a cycle anchored on `base` through `a` and `b`.
    pub fn new(base: &str, a: &str, b: &str) -> Self {
        Self {
            cycle: [
                base.to_string(),
                a.to_string(),
                b.to_string(),
                base.to_string(),
            ],
        }
    }

    /// The anchoring base currency.
    pub fn base(&self) -> &str {
        &self.cycle[0]
    }

    /// The first intermediate currency.
    pub fn first(&self) -> &str {
        &self.cycle[1]
    }

    /// The second intermediate currency.
    pub fn second(&self) -> &str {
        &self.cycle[2]
    }
}

impl fmt::Display for TriangularPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cycle.join(" -> "))
    }
}

/// Enumerate triangular cycles anchored on `base_currency`.
///
/// Candidates come from ordered pairs of distinct one-hop neighbors of the
/// base; a cycle is emitted only when its middle leg is directly quotable in
/// the snapshot. Both directed orders of an unordered neighbor pair are kept
/// since they price differently. A base with fewer than two neighbors yields
/// nothing.
pub fn generate_paths(
    base_currency: &str,
    graph: &CurrencyGraph,
    snapshot: &MarketSnapshot,
) -> Vec<TriangularPath> {
    let mut neighbors = graph.neighbors(base_currency);
    // HashMap iteration order is arbitrary; fix it so scans are reproducible
    neighbors.sort_unstable();

    let mut paths = Vec::new();
    for a in &neighbors {
        if *a == base_currency {
            continue;
        }
        for b in &neighbors {
            if a == b || *b == base_currency {
                continue;
            }

            let forward = format!("{}/{}", a, b);
            let reverse = format!("{}/{}", b, a);
            if snapshot.contains(&forward) || snapshot.contains(&reverse) {
                paths.push(TriangularPath::new(base_currency, a, b));
            }
        }
    }

    paths
}
