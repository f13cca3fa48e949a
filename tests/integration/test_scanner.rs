//! Scan scheduler scenarios: partial fetch failures and cooperative stop

use crate::fixtures;
use crate::fixtures::QuoteFixture;
use std::time::Duration;
use tokio::time::timeout;
use triangular_arbitrage::strategy::{ArbitrageScanner, ScannerState};

const MARKET_WITH_BNB_LEG: &[QuoteFixture] = &[
    ("USDT/BTC", 0.000025, 500.0, 0.000024, 0.000025),
    ("BTC/ETH", 16.0, 125.3, 15.9, 16.0),
    ("ETH/USDT", 2605.0, 8950.2, 2600.0, 2610.0),
    ("BTC/BNB", 137.0, 89.7, 136.8, 137.2),
    ("BNB/USDT", 315.5, 2150.8, 315.2, 315.8),
];

#[tokio::test]
async fn test_failed_symbol_leaves_other_triangles_tradable() {
    let config = fixtures::config_for(MARKET_WITH_BNB_LEG);
    let client = fixtures::StaticClient::new(MARKET_WITH_BNB_LEG).failing_on("ETH/USDT");
    let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
    let mut executor = fixtures::quiet_executor();

    // ETH/USDT is gone, so no ETH triangle survives, but the BTC/BNB cycle
    // must still be evaluated and the cycle must not error
    scanner.scan_cycle(&mut executor).await.unwrap();

    let stats = scanner.get_statistics().await;
    assert_eq!(stats.scans_completed, 1);
    assert_eq!(stats.opportunities_detected, 2);
    assert_eq!(stats.opportunities_executed, 1);

    let fill = &executor.history()[0];
    assert_eq!(fill.path[1], "BTC");
    assert_eq!(fill.path[2], "BNB");
}

#[tokio::test]
async fn test_all_symbols_failing_completes_cycle() {
    let config = fixtures::config_for(fixtures::PROFITABLE_TRIANGLE);
    let client = fixtures::StaticClient::new(&[]);
    let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
    let mut executor = fixtures::quiet_executor();

    scanner.scan_cycle(&mut executor).await.unwrap();

    let stats = scanner.get_statistics().await;
    assert_eq!(stats.scans_completed, 1);
    assert_eq!(stats.opportunities_detected, 0);
}

#[tokio::test]
async fn test_cooperative_stop_ends_run_loop() {
    let mut config = fixtures::config_for(fixtures::PROFITABLE_TRIANGLE);
    config.scanner.scan_interval_secs = 1;
    config.execution.enable_trading = false;

    let client = fixtures::StaticClient::new(fixtures::PROFITABLE_TRIANGLE);
    let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
    let handle = scanner.handle();

    let task = tokio::spawn(async move {
        let mut executor = fixtures::quiet_executor();
        scanner.run_with_executor(&mut executor).await.unwrap();
        scanner
    });

    // Let at least one cycle complete, then request a stop
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.stop().await;

    let scanner = timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    assert_eq!(scanner.get_state().await, ScannerState::Stopped);
    assert!(scanner.get_statistics().await.scans_completed >= 1);
}
