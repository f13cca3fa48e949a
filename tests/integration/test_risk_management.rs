//! Risk gating observed through full scan cycles

use crate::fixtures;
use triangular_arbitrage::strategy::ArbitrageScanner;

#[tokio::test]
async fn test_cooldown_denies_second_cycle() {
    let config = fixtures::config_for(fixtures::PROFITABLE_TRIANGLE);
    let client = fixtures::StaticClient::new(fixtures::PROFITABLE_TRIANGLE);
    let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
    let mut executor = fixtures::quiet_executor();

    scanner.scan_cycle(&mut executor).await.unwrap();
    scanner.scan_cycle(&mut executor).await.unwrap();

    // The first cycle trades; the second is inside the 60s cooldown
    let stats = scanner.get_statistics().await;
    assert_eq!(stats.scans_completed, 2);
    assert_eq!(stats.opportunities_executed, 1);
    assert_eq!(executor.history().len(), 1);

    let risk_state = scanner.get_risk_state().await;
    assert_eq!(risk_state.daily_trade_count, 1);
}

#[tokio::test]
async fn test_daily_cap_denies_after_exhaustion() {
    let mut config = fixtures::config_for(fixtures::PROFITABLE_TRIANGLE);
    config.risk.max_daily_trades = 1;
    config.risk.cooldown_secs = 0;

    let client = fixtures::StaticClient::new(fixtures::PROFITABLE_TRIANGLE);
    let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
    let mut executor = fixtures::quiet_executor();

    for _ in 0..3 {
        scanner.scan_cycle(&mut executor).await.unwrap();
    }

    let risk_state = scanner.get_risk_state().await;
    assert_eq!(risk_state.daily_trade_count, 1);
    assert_eq!(scanner.get_statistics().await.opportunities_executed, 1);
}

#[tokio::test]
async fn test_successful_execution_books_realized_profit() {
    let config = fixtures::config_for(fixtures::PROFITABLE_TRIANGLE);
    let client = fixtures::StaticClient::new(fixtures::PROFITABLE_TRIANGLE);
    let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
    let mut executor = fixtures::quiet_executor();

    scanner.scan_cycle(&mut executor).await.unwrap();

    let risk_state = scanner.get_risk_state().await;
    assert_eq!(risk_state.daily_trade_count, 1);
    assert!(risk_state.last_trade_at.is_some());

    // Best candidate compounds 100 -> 104; jitter is disabled
    assert!((risk_state.daily_profit - 4.0).abs() < 1e-9);
    let stats = scanner.get_statistics().await;
    assert!((stats.realized_profit - 4.0).abs() < 1e-9);
}
