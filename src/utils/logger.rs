//! Logging initialization

use crate::Result;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Initialize the tracing subscriber.
///
/// Always logs to the console; when `log_file` is given, a daily-rotated file
/// layer without ANSI codes is added alongside. `RUST_LOG` overrides
/// `log_level` when set.
pub fn init(log_level: &str, log_file: Option<&Path>) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let console_layer = fmt::layer().with_target(true);

    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let file_appender = RollingFileAppender::new(
                Rotation::DAILY,
                path.parent().unwrap_or_else(|| Path::new(".")),
                path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("tri-arb.log")),
            );

            let file_layer = fmt::layer().with_ansi(false).with_writer(file_appender);

            Registry::default()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .init();
        }
        None => {
            Registry::default()
                .with(env_filter)
                .with(console_layer)
                .init();
        }
    }

    Ok(())
}
