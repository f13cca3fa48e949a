//! Process metrics recorded through the `metrics` facade
//!
//! Only the facade is wired here; attaching a recorder/exporter is left to
//! the embedding application.

/// Completed scan cycles across all exchanges
pub const SCANS_TOTAL: &str = "triarb_scans_total";

/// Opportunities that cleared the reporting threshold
pub const OPPORTUNITIES_TOTAL: &str = "triarb_opportunities_total";

/// Opportunities executed with a confirmed transfer
pub const EXECUTIONS_TOTAL: &str = "triarb_executions_total";

/// Exchange-level scan failures
pub const SCAN_ERRORS_TOTAL: &str = "triarb_scan_errors_total";

/// Realized profit of the most recent confirmed execution
pub const LAST_PROFIT: &str = "triarb_last_profit";

/// Describe all exported metrics. Call once at startup.
pub fn register() {
    metrics::describe_counter!(SCANS_TOTAL, "Completed scan cycles");
    metrics::describe_counter!(OPPORTUNITIES_TOTAL, "Opportunities above the reporting threshold");
    metrics::describe_counter!(EXECUTIONS_TOTAL, "Confirmed trade executions");
    metrics::describe_counter!(SCAN_ERRORS_TOTAL, "Exchange-level scan failures");
    metrics::describe_gauge!(LAST_PROFIT, "Realized profit of the last execution");
}
