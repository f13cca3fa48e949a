//! Utility modules

pub mod logger;
pub mod metrics;
pub mod telemetry;

pub use telemetry::{TelemetrySink, TracingTelemetry};
