//! Structured logging for the gas price integration
//!
//! Hosts that already install a `tracing` subscriber can skip
//! [`init_logging`]; the component loggers only emit events.

use crate::config::LoggingConfig;
use crate::error::{GasPriceError, Result};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Once;
use tracing::{Level, debug, error, info, trace, warn};
use tracing_appender::non_blocking;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// Keep the non-blocking worker guard alive for the entire process lifetime
static LOG_GUARD: OnceCell<WorkerGuard> = OnceCell::new();
static INIT_ONCE: Once = Once::new();
static INIT_ERROR: OnceCell<String> = OnceCell::new();

/// Initialize the global subscriber; later calls only report the first outcome
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    INIT_ONCE.call_once(|| {
        let init_result = (|| -> Result<()> {
            let level = parse_log_level(&config.level)?;
            let filter = build_env_filter(level);

            let console_layer = if config.console_output {
                let (writer, guard) = non_blocking(std::io::stdout());
                let _ = LOG_GUARD.set(guard);
                let base = fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false);
                let layer = if config.json_format {
                    base.json().with_filter(LevelFilter::from_level(level)).boxed()
                } else {
                    base.with_filter(LevelFilter::from_level(level)).boxed()
                };
                Some(layer)
            } else {
                None
            };

            tracing_subscriber::registry()
                .with(filter)
                .with(console_layer)
                .try_init()
                .map_err(|e| GasPriceError::config(format!("Logging already set up: {}", e)))?;

            info!(
                "Logging initialized - level: {:?}, json: {}",
                level, config.json_format
            );
            Ok(())
        })();

        if let Err(e) = init_result {
            let _ = INIT_ERROR.set(e.to_string());
        }
    });

    if let Some(err) = INIT_ERROR.get() {
        return Err(GasPriceError::config(err.clone()));
    }
    Ok(())
}

fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("energyzero_gas_prices={},reqwest=warn", level).into())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level_str: &str) -> Result<Level> {
    match level_str.trim().to_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(GasPriceError::config(format!(
            "Invalid log level: {}",
            level_str
        ))),
    }
}

/// Context attached to every message of a component logger
#[derive(Debug, Clone)]
pub struct LogContext {
    /// Component name (e.g., "energyzero", "coordinator")
    pub component: String,

    /// Additional context fields, rendered in key order
    pub extra_fields: BTreeMap<String, String>,
}

impl LogContext {
    pub fn new(component: &str) -> Self {
        Self {
            component: component.to_string(),
            extra_fields: BTreeMap::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: String) -> Self {
        self.extra_fields.insert(key.to_string(), value);
        self
    }
}

/// Structured logger with context
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    context: LogContext,
}

impl StructuredLogger {
    pub fn new(context: LogContext) -> Self {
        Self { context }
    }

    pub fn component(&self) -> &str {
        &self.context.component
    }

    /// Copy of this logger with one more context field
    pub fn with_field(&self, key: &str, value: String) -> Self {
        Self::new(self.context.clone().with_field(key, value))
    }

    pub fn info(&self, message: &str) {
        let fields = self.format_fields();
        info!(%fields, "{}", message);
    }

    pub fn warn(&self, message: &str) {
        let fields = self.format_fields();
        warn!(%fields, "{}", message);
    }

    pub fn error(&self, message: &str) {
        let fields = self.format_fields();
        error!(%fields, "{}", message);
    }

    pub fn debug(&self, message: &str) {
        let fields = self.format_fields();
        debug!(%fields, "{}", message);
    }

    pub fn trace(&self, message: &str) {
        let fields = self.format_fields();
        trace!(%fields, "{}", message);
    }

    fn format_fields(&self) -> String {
        let mut fields = vec![format!("component={}", self.context.component)];
        for (key, value) in &self.context.extra_fields {
            fields.push(format!("{}={}", key, value));
        }
        fields.join(",")
    }
}

/// Create a logger for a specific component
pub fn get_logger(component: &str) -> StructuredLogger {
    StructuredLogger::new(LogContext::new(component))
}
