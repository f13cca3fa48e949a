//! Scan scheduling, admission control, and execution dispatch

use crate::{
    config::ArbitrageConfig,
    connectors::{ClientFactory, ExchangeClient},
    data::MarketSnapshot,
    strategy::{
        calculator::evaluate_path,
        graph::CurrencyGraph,
        paths::generate_paths,
        ranker::rank_opportunities,
        risk_manager::{RiskGate, RiskState, TradeDecision},
        ArbitrageOpportunity,
    },
    trading::TradeExecutor,
    utils::{
        metrics::{
            EXECUTIONS_TOTAL, LAST_PROFIT, OPPORTUNITIES_TOTAL, SCANS_TOTAL, SCAN_ERRORS_TOTAL,
        },
        telemetry::{TelemetrySink, TracingTelemetry},
    },
    Result,
};
use chrono::{NaiveDate, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Execution requires profit at least this multiple of the reporting
/// threshold.
pub const EXECUTION_THRESHOLD_FACTOR: f64 = 2.0;

/// Backoff after an exchange-level scan failure
const ERROR_BACKOFF: Duration = Duration::from_secs(5);

/// How often a paused scanner re-checks its state
const PAUSE_POLL: Duration = Duration::from_secs(1);

/// Scanner lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    /// Scanner is stopped
    Stopped,
    /// Scanner is running
    Running,
    /// Scanner is paused; the loop idles without scanning
    Paused,
}

/// Scanner statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerStatistics {
    /// Completed scan cycles across all exchanges
    pub scans_completed: u64,
    /// Opportunities that cleared the reporting threshold
    pub opportunities_detected: u64,
    /// Opportunities executed with a confirmed transfer
    pub opportunities_executed: u64,
    /// Realized profit across confirmed transfers
    pub realized_profit: f64,
    /// Unix timestamp of the last confirmed execution
    pub last_execution: Option<i64>,
    /// Scanner uptime in seconds
    pub uptime_seconds: u64,
}

/// Cloneable control handle for a running scanner.
#[derive(Debug, Clone)]
pub struct ScannerHandle {
    state: Arc<RwLock<ScannerState>>,
}

impl ScannerHandle {
    /// Request a cooperative stop, observed at the top of the scan loop.
    pub async fn stop(&self) {
        *self.state.write().await = ScannerState::Stopped;
    }

    /// Pause scanning without tearing the loop down.
    pub async fn pause(&self) {
        *self.state.write().await = ScannerState::Paused;
    }

    /// Resume a paused scanner.
    pub async fn resume(&self) {
        *self.state.write().await = ScannerState::Running;
    }

    /// Current lifecycle state.
    pub async fn get_state(&self) -> ScannerState {
        *self.state.read().await
    }
}

/// The scan scheduler: drives the per-exchange detection pipeline and gates
/// execution behind the risk gate.
pub struct ArbitrageScanner {
    config: ArbitrageConfig,
    clients: Vec<Box<dyn ExchangeClient>>,
    risk_gate: RiskGate,
    risk_state: Arc<RwLock<RiskState>>,
    state: Arc<RwLock<ScannerState>>,
    statistics: Arc<RwLock<ScannerStatistics>>,
    telemetry: Arc<dyn TelemetrySink>,
    current_day: NaiveDate,
    start_time: Instant,
}

impl ArbitrageScanner {
    /// Create a scanner with clients built from the enabled-exchange list.
    pub fn new(config: ArbitrageConfig) -> Result<Self> {
        let mut clients: Vec<Box<dyn ExchangeClient>> = Vec::new();
        for name in &config.exchanges.enabled {
            let exchange = name.parse()?;
            clients.push(ClientFactory::create(exchange, &config.exchanges)?);
        }

        Ok(Self::with_clients(config, clients))
    }

    /// Create a scanner over explicit clients; used by tests to inject
    /// in-memory doubles.
    pub fn with_clients(config: ArbitrageConfig, clients: Vec<Box<dyn ExchangeClient>>) -> Self {
        let risk_gate = RiskGate::new(&config);
        Self {
            config,
            clients,
            risk_gate,
            risk_state: Arc::new(RwLock::new(RiskState::new())),
            state: Arc::new(RwLock::new(ScannerState::Stopped)),
            statistics: Arc::new(RwLock::new(ScannerStatistics::default())),
            telemetry: Arc::new(TracingTelemetry),
            current_day: Utc::now().date_naive(),
            start_time: Instant::now(),
        }
    }

    /// Replace the telemetry sink.
    pub fn with_telemetry(mut self, telemetry: Arc<dyn TelemetrySink>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Control handle usable from other tasks.
    pub fn handle(&self) -> ScannerHandle {
        ScannerHandle {
            state: Arc::clone(&self.state),
        }
    }

    /// Run the scan loop until externally stopped.
    pub async fn run_with_executor<T>(&mut self, executor: &mut T) -> Result<()>
    where
        T: TradeExecutor,
    {
        info!(exchanges = self.clients.len(), "starting arbitrage scanner");
        *self.state.write().await = ScannerState::Running;

        loop {
            match *self.state.read().await {
                ScannerState::Stopped => break,
                ScannerState::Paused => {
                    tokio::time::sleep(PAUSE_POLL).await;
                    continue;
                }
                ScannerState::Running => {}
            }

            self.scan_cycle(executor).await?;

            tokio::time::sleep(Duration::from_secs(self.config.scanner.scan_interval_secs)).await;
        }

        self.shutdown().await;
        info!("arbitrage scanner stopped");
        Ok(())
    }

    /// Run one full cycle over every configured exchange.
    ///
    /// Exchange-level failures are reported as `scan_error` telemetry and
    /// followed by a short backoff; they never propagate out of the cycle.
    pub async fn scan_cycle<T>(&mut self, executor: &mut T) -> Result<()>
    where
        T: TradeExecutor,
    {
        self.roll_day_if_needed().await;

        for i in 0..self.clients.len() {
            let exchange = self.clients[i].exchange();
            debug!(%exchange, "scanning for opportunities");

            if let Err(e) = self.scan_exchange(self.clients[i].as_ref(), executor).await {
                self.telemetry.scan_error(exchange, &e);
                metrics::increment_counter!(SCAN_ERRORS_TOTAL);
                tokio::time::sleep(ERROR_BACKOFF).await;
            }
        }

        {
            let mut stats = self.statistics.write().await;
            stats.scans_completed += 1;
            stats.uptime_seconds = self.start_time.elapsed().as_secs();
        }
        metrics::increment_counter!(SCANS_TOTAL);

        Ok(())
    }

    /// Detection pipeline and execution dispatch for one exchange.
    async fn scan_exchange<T>(
        &self,
        client: &dyn ExchangeClient,
        executor: &mut T,
    ) -> Result<()>
    where
        T: TradeExecutor,
    {
        let exchange = client.exchange();
        let snapshot = self.fetch_market_data(client).await;

        if snapshot.is_empty() {
            warn!(%exchange, "no market data this cycle");
            return Ok(());
        }

        let graph = CurrencyGraph::from_snapshot(&snapshot);
        let timestamp = Utc::now().timestamp();

        let mut candidates = Vec::new();
        for base in &self.config.scanner.base_currencies {
            for path in generate_paths(base, &graph, &snapshot) {
                if let Some(opportunity) = evaluate_path(&path, &snapshot, exchange, timestamp) {
                    candidates.push(opportunity);
                }
            }
        }

        let min_threshold = self.config.scanner.min_profit_threshold;
        let ranked = rank_opportunities(candidates, min_threshold);

        if ranked.is_empty() {
            debug!(%exchange, "no profitable opportunities");
            return Ok(());
        }

        info!(%exchange, count = ranked.len(), "opportunities detected");
        {
            let mut stats = self.statistics.write().await;
            stats.opportunities_detected += ranked.len() as u64;
        }
        metrics::counter!(OPPORTUNITIES_TOTAL, ranked.len() as u64);

        for opportunity in &ranked {
            self.telemetry.opportunity_found(opportunity);
        }

        for opportunity in &ranked {
            // Ranked descending: once one candidate misses the execution
            // bar, the rest do too
            if opportunity.profit_percentage < min_threshold * EXECUTION_THRESHOLD_FACTOR {
                break;
            }
            self.try_execute(opportunity, executor).await;
        }

        Ok(())
    }

    /// Fetch every configured symbol concurrently and assemble the snapshot.
    ///
    /// A failed or unavailable symbol is dropped from the snapshot; it never
    /// aborts the cycle.
    async fn fetch_market_data(&self, client: &dyn ExchangeClient) -> MarketSnapshot {
        let fetches = self.config.scanner.trading_pairs.iter().map(|symbol| {
            let symbol = symbol.as_str();
            async move { (symbol, client.fetch_ticker(symbol).await) }
        });

        let results = join_all(fetches).await;

        let mut snapshot = MarketSnapshot::new();
        for (symbol, result) in results {
            match result {
                Ok(Some(pair)) if pair.is_well_formed() => snapshot.insert(pair),
                Ok(Some(_)) => warn!(symbol, "malformed quote dropped"),
                Ok(None) => debug!(symbol, "symbol unavailable"),
                Err(e) => warn!(symbol, error = %e, "ticker fetch failed"),
            }
        }

        debug!(pairs = snapshot.len(), "snapshot assembled");
        snapshot
    }

    /// Consult the risk gate and, if allowed, hand off to the executor.
    ///
    /// Bookkeeping happens only for transfers the executor confirms; denied,
    /// failed, and errored executions leave the risk state untouched.
    async fn try_execute<T>(&self, opportunity: &ArbitrageOpportunity, executor: &mut T)
    where
        T: TradeExecutor,
    {
        let now = Utc::now().timestamp();
        let decision = {
            let state = self.risk_state.read().await;
            self.risk_gate.evaluate(opportunity, &state, now)
        };

        if let TradeDecision::Denied(reason) = decision {
            debug!(exchange = %opportunity.exchange, %reason, "trade denied by risk gate");
            return;
        }

        if !self.config.execution.enable_trading {
            info!(exchange = %opportunity.exchange, "trading disabled; skipping execution");
            return;
        }

        match executor.execute(opportunity).await {
            Ok(report) => {
                self.telemetry.opportunity_executed(opportunity, &report);

                if report.succeeded {
                    let executed_at = Utc::now().timestamp();
                    {
                        let mut state = self.risk_state.write().await;
                        self.risk_gate
                            .record_trade(&mut state, report.actual_profit, executed_at);
                    }

                    let mut stats = self.statistics.write().await;
                    stats.opportunities_executed += 1;
                    stats.realized_profit += report.actual_profit;
                    stats.last_execution = Some(executed_at);

                    metrics::increment_counter!(EXECUTIONS_TOTAL);
                    metrics::gauge!(LAST_PROFIT, report.actual_profit);
                }
            }
            Err(e) => {
                self.telemetry.scan_error(opportunity.exchange, &e);
            }
        }
    }

    /// Zero the daily risk counters when the UTC date changes.
    async fn roll_day_if_needed(&mut self) {
        let today = Utc::now().date_naive();
        if today != self.current_day {
            info!(%today, "day boundary; rolling daily risk counters");
            self.risk_state.write().await.roll_day();
            self.current_day = today;
        }
    }

    /// Close every exchange client, tolerating individual failures.
    async fn shutdown(&self) {
        for client in &self.clients {
            if let Err(e) = client.close().await {
                warn!(exchange = %client.exchange(), error = %e, "client teardown failed");
            }
        }
    }

    /// Current lifecycle state.
    pub async fn get_state(&self) -> ScannerState {
        *self.state.read().await
    }

    /// Snapshot of the scanner statistics.
    pub async fn get_statistics(&self) -> ScannerStatistics {
        self.statistics.read().await.clone()
    }

    /// Snapshot of the risk counters.
    pub async fn get_risk_state(&self) -> RiskState {
        self.risk_state.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectors::Exchange;
    use crate::data::TradingPair;
    use crate::trading::simulated::{SimulationConfig, SimulatedExecutor};
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory client double serving fixed quotes.
    struct StaticClient {
        exchange: Exchange,
        quotes: HashMap<String, TradingPair>,
        failing: Vec<String>,
    }

    impl StaticClient {
        fn new(quotes: &[(&str, f64, f64, f64)]) -> Self {
            let mut map = HashMap::new();
            for (symbol, price, bid, ask) in quotes {
                map.insert(
                    symbol.to_string(),
                    TradingPair::from_symbol(symbol, *price, 100.0, *bid, *ask).unwrap(),
                );
            }
            Self {
                exchange: Exchange::Binance,
                quotes: map,
                failing: Vec::new(),
            }
        }

        fn failing_on(mut self, symbol: &str) -> Self {
            self.failing.push(symbol.to_string());
            self
        }
    }

    #[async_trait]
    impl ExchangeClient for StaticClient {
        fn exchange(&self) -> Exchange {
            self.exchange
        }

        async fn fetch_ticker(&self, symbol: &str) -> Result<Option<TradingPair>> {
            if self.failing.iter().any(|s| s == symbol) {
                return Err(crate::ArbitrageError::Connection("fetch failed".to_string()).into());
            }
            Ok(self.quotes.get(symbol).cloned())
        }

        async fn close(&self) -> Result<()> {
            Ok(())
        }
    }

    fn test_config() -> ArbitrageConfig {
        let mut config = ArbitrageConfig::default();
        config.scanner.base_currencies = vec!["USDT".to_string()];
        config.scanner.trading_pairs = vec![
            "USDT/BTC".to_string(),
            "BTC/ETH".to_string(),
            "ETH/USDT".to_string(),
        ];
        config.scanner.min_profit_threshold = 0.5;
        config.execution.enable_trading = true;
        config
    }

    /// Quotes that compound 100 -> 104 on [USDT, BTC, ETH, USDT].
    fn profitable_client() -> StaticClient {
        StaticClient::new(&[
            ("USDT/BTC", 0.000025, 0.000024, 0.000025),
            ("BTC/ETH", 16.0, 15.9, 16.0),
            ("ETH/USDT", 2605.0, 2600.0, 2610.0),
        ])
    }

    fn quiet_executor() -> SimulatedExecutor {
        SimulatedExecutor::with_config(SimulationConfig {
            profit_jitter: 0.0,
            ..SimulationConfig::default()
        })
    }

    #[tokio::test]
    async fn test_scan_cycle_detects_and_executes() {
        let config = test_config();
        let mut scanner =
            ArbitrageScanner::with_clients(config, vec![Box::new(profitable_client())]);
        let mut executor = quiet_executor();

        scanner.scan_cycle(&mut executor).await.unwrap();

        let stats = scanner.get_statistics().await;
        assert_eq!(stats.scans_completed, 1);
        assert!(stats.opportunities_detected >= 1);
        // 4% profit clears the 1.0% execution bar
        assert_eq!(stats.opportunities_executed, 1);

        let risk_state = scanner.get_risk_state().await;
        assert_eq!(risk_state.daily_trade_count, 1);
        assert!(risk_state.last_trade_at.is_some());
    }

    #[tokio::test]
    async fn test_trading_disabled_skips_execution() {
        let mut config = test_config();
        config.execution.enable_trading = false;
        let mut scanner =
            ArbitrageScanner::with_clients(config, vec![Box::new(profitable_client())]);
        let mut executor = quiet_executor();

        scanner.scan_cycle(&mut executor).await.unwrap();

        let stats = scanner.get_statistics().await;
        assert!(stats.opportunities_detected >= 1);
        assert_eq!(stats.opportunities_executed, 0);
        assert_eq!(scanner.get_risk_state().await.daily_trade_count, 0);
    }

    #[tokio::test]
    async fn test_failed_execution_skips_bookkeeping() {
        let config = test_config();
        let mut scanner =
            ArbitrageScanner::with_clients(config, vec![Box::new(profitable_client())]);
        let mut executor = SimulatedExecutor::with_config(SimulationConfig {
            rejection_probability: 1.0,
            ..SimulationConfig::default()
        });

        scanner.scan_cycle(&mut executor).await.unwrap();

        let risk_state = scanner.get_risk_state().await;
        assert_eq!(risk_state.daily_trade_count, 0);
        assert!(risk_state.last_trade_at.is_none());
        assert_eq!(scanner.get_statistics().await.opportunities_executed, 0);
    }

    #[tokio::test]
    async fn test_failed_symbol_does_not_abort_cycle() {
        let config = test_config();
        let client = profitable_client().failing_on("ETH/USDT");
        let mut scanner = ArbitrageScanner::with_clients(config, vec![Box::new(client)]);
        let mut executor = quiet_executor();

        // The settling leg is gone, so nothing is detected, but the cycle
        // completes without error
        scanner.scan_cycle(&mut executor).await.unwrap();

        let stats = scanner.get_statistics().await;
        assert_eq!(stats.scans_completed, 1);
        assert_eq!(stats.opportunities_detected, 0);
    }

    #[tokio::test]
    async fn test_state_management() {
        let scanner = ArbitrageScanner::with_clients(test_config(), Vec::new());
        let handle = scanner.handle();

        assert_eq!(scanner.get_state().await, ScannerState::Stopped);

        handle.resume().await;
        assert_eq!(scanner.get_state().await, ScannerState::Running);

        handle.pause().await;
        assert_eq!(scanner.get_state().await, ScannerState::Paused);

        handle.stop().await;
        assert_eq!(scanner.get_state().await, ScannerState::Stopped);
    }
}
