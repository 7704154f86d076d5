//! Observability module for logging setup and metrics recording.
//!
//! This module provides:
//! - Structured logging with configurable levels and formats
//! - Tracing span helpers for text processing operations
//! - Metrics recording through the `metrics` facade (no-ops until a recorder is installed)

pub mod metrics;

use anyhow::Result;
use tracing_subscriber::prelude::*;

use crate::observability_config::ObservabilityConfig;

pub use self::metrics::{record_export_metrics, record_item_toggle, record_text_processing_metrics};

/// Initialize structured logging from environment variables
pub fn init_tracing() -> Result<()> {
    init_tracing_with_config(&ObservabilityConfig::from_env())
}

/// Initialize structured logging with tracing and configuration
///
/// Log output goes to stderr so command output on stdout stays clean.
pub fn init_tracing_with_config(config: &ObservabilityConfig) -> Result<()> {
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid observability configuration: {}", e))?;

    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("recipe_catalogue={}", config.log_level).parse()?);

    if config.use_pretty_format() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_thread_names(true),
            )
            .try_init()?;
    }

    tracing::info!(
        environment = %config.environment,
        log_level = %config.log_level,
        "Tracing initialized with structured logging"
    );
    Ok(())
}

/// Create a span for text processing operations
pub fn text_processing_span(operation: &str) -> tracing::Span {
    tracing::info_span!(
        "text_processing_operation",
        operation = operation,
        component = "text_processing"
    )
}
