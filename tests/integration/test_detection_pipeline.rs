//! End-to-end detection pipeline: snapshot -> graph -> paths -> calculator
//! -> ranker

use crate::fixtures;
use triangular_arbitrage::connectors::Exchange;
use triangular_arbitrage::strategy::{
    evaluate_path, generate_paths, rank_opportunities, CurrencyGraph, TriangularPath,
};

#[test]
fn test_full_pipeline_over_forward_triangle() {
    let snapshot = fixtures::snapshot(fixtures::PROFITABLE_TRIANGLE);
    let graph = CurrencyGraph::from_snapshot(&snapshot);

    let paths = generate_paths("USDT", &graph, &snapshot);
    assert_eq!(paths.len(), 2);
    assert!(paths.contains(&TriangularPath::new("USDT", "BTC", "ETH")));
    assert!(paths.contains(&TriangularPath::new("USDT", "ETH", "BTC")));

    let candidates: Vec<_> = paths
        .iter()
        .filter_map(|p| evaluate_path(p, &snapshot, Exchange::Binance, 0))
        .collect();
    assert_eq!(candidates.len(), 2);

    let ranked = rank_opportunities(candidates, 0.5);
    assert_eq!(ranked.len(), 2);

    // Forward direction: 100 * 0.000025 * 16.0 * 2600 = 104
    assert_eq!(ranked[0].path[1], "BTC");
    assert!((ranked[0].profit_percentage - 4.0).abs() < 1e-9);

    // Opposite direction prices through reciprocals: 100 * 2600 * 15.9 *
    // 0.000025 = 103.35
    assert_eq!(ranked[1].path[1], "ETH");
    assert!((ranked[1].profit_percentage - 3.35).abs() < 1e-9);
}

#[test]
fn test_ranked_output_is_descending_and_thresholded() {
    let snapshot = fixtures::snapshot(fixtures::MARKET);
    let graph = CurrencyGraph::from_snapshot(&snapshot);

    let mut candidates = Vec::new();
    for base in ["USDT", "BTC", "ETH"] {
        for path in generate_paths(base, &graph, &snapshot) {
            if let Some(opportunity) = evaluate_path(&path, &snapshot, Exchange::Binance, 0) {
                candidates.push(opportunity);
            }
        }
    }

    let threshold = 0.5;
    let ranked = rank_opportunities(candidates, threshold);

    for pair in ranked.windows(2) {
        assert!(pair[0].profit_percentage >= pair[1].profit_percentage);
    }
    assert!(ranked.iter().all(|o| o.profit_percentage >= threshold));
}

#[test]
fn test_market_yields_both_directions_per_neighbor_pair() {
    let snapshot = fixtures::snapshot(fixtures::MARKET);
    let graph = CurrencyGraph::from_snapshot(&snapshot);

    // USDT reaches BTC, ETH, BNB; every ordered pair has a quotable middle
    // leg, and directed duplicates are kept
    let paths = generate_paths("USDT", &graph, &snapshot);
    assert_eq!(paths.len(), 6);
}

#[test]
fn test_snapshot_without_triangles_detects_nothing() {
    let snapshot = fixtures::snapshot(&[
        ("BTC/USDT", 43250.0, 1250.5, 43240.0, 43260.0),
        ("ETH/USDT", 2580.0, 8950.2, 2578.0, 2582.0),
    ]);
    let graph = CurrencyGraph::from_snapshot(&snapshot);

    assert!(generate_paths("USDT", &graph, &snapshot).is_empty());
    assert!(generate_paths("BTC", &graph, &snapshot).is_empty());
}
