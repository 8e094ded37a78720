//! Tracing subscriber setup for poller processes.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{DriverError, DriverResult};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so that record output on stdout stays machine readable.
pub fn init_logging(config: &LoggingConfig) -> DriverResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .json(),
            )
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false),
            )
            .try_init(),
    };

    result.map_err(|e| DriverError::internal(format!("failed to install subscriber: {}", e)))
}
