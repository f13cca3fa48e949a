//! Tradable-currency graph derived from a market snapshot

use crate::data::MarketSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One directed trading edge between two currencies.
///
/// `base_is_source` records whether the source currency is the base
/// (numerator) of `symbol`, so quotation direction is recoverable without
/// re-parsing the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Pair symbol this edge trades through
    pub symbol: String,
    /// Whether the edge's source currency is the pair's base
    pub base_is_source: bool,
}

/// Adjacency structure over the currencies quoted in one snapshot.
///
/// Ephemeral: rebuilt from scratch for every scan cycle.
#[derive(Debug, Clone, Default)]
pub struct CurrencyGraph {
    edges: HashMap<String, HashMap<String, GraphEdge>>,
}

impl CurrencyGraph {
    /// Build the graph from a snapshot.
    ///
    /// Every pair `base/quote` contributes two directed edges: base reaches
    /// quote through the symbol quoted forward, and quote reaches base
    /// through the same symbol quoted in reverse. An empty snapshot yields an
    /// empty graph.
    pub fn from_snapshot(snapshot: &MarketSnapshot) -> Self {
        let mut edges: HashMap<String, HashMap<String, GraphEdge>> = HashMap::new();

        for (symbol, pair) in snapshot.iter() {
            edges.entry(pair.base.clone()).or_default().insert(
                pair.quote.clone(),
                GraphEdge {
                    symbol: symbol.clone(),
                    base_is_source: true,
                },
            );
            edges.entry(pair.quote.clone()).or_default().insert(
                pair.base.clone(),
                GraphEdge {
                    symbol: symbol.clone(),
                    base_is_source: false,
                },
            );
        }

        Self { edges }
    }

    /// Currencies directly reachable from `currency` through any quoted pair.
    pub fn neighbors(&self, currency: &str) -> Vec<&str> {
        self.edges
            .get(currency)
            .map(|targets| targets.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The edge from one currency to another, if the pair is quoted.
    pub fn edge(&self, from: &str, to: &str) -> Option<&GraphEdge> {
        self.edges.get(from).and_then(|targets| targets.get(to))
    }

    /// Number of currencies with at least one edge.
    pub fn currency_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph holds no currencies at all.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
