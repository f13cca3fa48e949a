//! Exchange client trait

use crate::{connectors::Exchange, data::TradingPair, Result};
use async_trait::async_trait;

/// Per-call ticker capability the scanner consumes.
///
/// `fetch_ticker` returns `Ok(None)` when the venue simply does not quote the
/// symbol; that is an ordinary outcome, not an error. `Err` is reserved for
/// transport-level failures (connectivity loss, timeout), which the scan loop
/// also tolerates by dropping the symbol from the cycle's snapshot.
#[async_trait]
pub trait ExchangeClient: Send + Sync {
    /// The venue this client talks to.
    fn exchange(&self) -> Exchange;

    /// Fetch the current top-of-book quote for a `BASE/QUOTE` symbol.
    async fn fetch_ticker(&self, symbol: &str) -> Result<Option<TradingPair>>;

    /// Release any resources held by the client.
    async fn close(&self) -> Result<()>;
}
