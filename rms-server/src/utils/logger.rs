//! Logging Infrastructure
//!
//! Structured logging setup: stdout (text or JSON) plus an optional daily
//! rolling file. `RUST_LOG` overrides the configured level.

use std::path::Path;

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logger with optional file output
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer()
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_target(false)
            .boxed()
    };

    // Add file output if log_dir exists
    let file_layer = log_dir.filter(|dir| Path::new(dir).exists()).map(|dir| {
        let file_appender = tracing_appender::rolling::daily(dir, "rms-server");
        fmt::layer()
            .with_writer(file_appender)
            .with_ansi(false)
            .boxed()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
