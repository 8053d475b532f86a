//! Telemetry configuration.

/// Logging configuration, read from the environment at startup.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `CG_SERVICE_NAME` | `consortium-gate` | Service name stamped on events |
/// | `CG_LOG_FILTER` | `info` | `tracing` env-filter directive |
/// | `CG_LOG_JSON` | unset | Any value switches to JSON output |
#[derive(Clone, Debug)]
pub struct TelemetryConfig {
    /// Service name stamped on every event.
    pub service_name: String,
    /// Env-filter directive, e.g. `info` or `cg_03_query_routing=debug`.
    pub log_filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "consortium-gate".to_string(),
            log_filter: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            service_name: std::env::var("CG_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_filter: std::env::var("CG_LOG_FILTER").unwrap_or(defaults.log_filter),
            json_logs: std::env::var("CG_LOG_JSON").is_ok(),
        }
    }
}
