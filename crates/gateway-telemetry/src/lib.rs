//! # Gateway Telemetry
//!
//! Structured logging for Consortium Gate services.
//!
//! All subsystem crates emit `tracing` events with `[cg-NN]` prefixes; this
//! crate owns the one-time subscriber installation. Output is
//! human-readable by default and switches to JSON lines for log shippers
//! via `CG_LOG_JSON`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gateway_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(&TelemetryConfig::from_env())
//!         .expect("telemetry init");
//!     // Application code; events are now collected.
//! }
//! ```

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Telemetry initialization errors.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The configured filter directive is invalid.
    #[error("invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("failed to install subscriber: {0}")]
    Init(String),
}

/// Guard that keeps telemetry active; hold it for the process lifetime.
pub struct TelemetryGuard {
    _private: (),
}

/// Install the global `tracing` subscriber.
///
/// Call once at startup. A second call fails with
/// [`TelemetryError::Init`] rather than silently replacing the subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter =
        EnvFilter::try_new(&config.log_filter).map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| TelemetryError::Init(e.to_string()))?;

    tracing::debug!(
        service = %config.service_name,
        json = config.json_logs,
        "telemetry initialized"
    );
    Ok(TelemetryGuard { _private: () })
}
