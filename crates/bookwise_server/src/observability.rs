//! Structured logging initialization.

use bookwise_error::{ServerError, ServerErrorKind};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. JSON formatting
/// is meant for production log shipping; the pretty format includes file
/// and line for local work.
///
/// # Errors
///
/// Returns an error when the filter cannot be parsed or a global
/// subscriber is already installed.
pub fn init_observability(log_level: &str, json_logs: bool) -> Result<(), ServerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| ServerError::new(ServerErrorKind::Observability(e.to_string())))?;

    let fmt_layer = if json_logs {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ServerError::new(ServerErrorKind::Observability(e.to_string())))
}
