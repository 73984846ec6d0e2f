//! Sonus exporter common library
//!
//! Shared pieces used by the client and the exporter:
//!
//! - [`config`] - Logging settings
//! - [`capture`] - Per-probe log capture layer
//! - [`error`] - Error types

pub mod capture;
pub mod config;
pub mod error;

pub use capture::{CaptureBuffer, CaptureLayer};
pub use config::{LogFormat, LoggingConfig};
pub use error::{Error, Result};

/// Initialize tracing with the given configuration.
///
/// The `fmt` output honours `RUST_LOG` or the configured level. Next to it a
/// [`CaptureLayer`] records DEBUG and above for `capture_targets` into the
/// buffer of whichever probe span the event belongs to.
///
/// # Example
///
/// ```ignore
/// use sonus_common::{LoggingConfig, LogFormat, init_tracing};
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Json,
/// };
/// init_tracing(&config, &["sonus_exporter", "sonus_client"])?;
/// ```
pub fn init_tracing(config: &LoggingConfig, capture_targets: &[&str]) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let capture = CaptureLayer::new().with_filter(CaptureLayer::targets(capture_targets));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(capture)
                .with(fmt::layer().with_filter(filter))
                .try_init()
                .map_err(|e| Error::Logging(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(capture)
                .with(fmt::layer().json().with_filter(filter))
                .try_init()
                .map_err(|e| Error::Logging(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
