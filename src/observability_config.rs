//! # Observability Configuration
//!
//! Environment-specific logging settings.

use std::env;

/// Accepted values for `log_level`
const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Accepted values for `log_format`
const LOG_FORMATS: [&str; 2] = ["pretty", "json"];

/// Observability configuration for different environments
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityConfig {
    /// Environment name (development, staging, production)
    pub environment: String,
    /// Log level for the crate's own targets
    pub log_level: String,
    /// Output format: "pretty" or "json"; `None` picks by environment
    pub log_format: Option<String>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            log_level: "info".to_string(),
            log_format: None,
        }
    }
}

impl ObservabilityConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .to_lowercase(),
            log_format: env::var("LOG_FORMAT").ok().map(|f| f.to_lowercase()),
        }
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Check if running in development environment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Whether logs should be rendered as human-readable text
    pub fn use_pretty_format(&self) -> bool {
        match self.log_format.as_deref() {
            Some(format) => format == "pretty",
            None => self.is_development(),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.trim().is_empty() {
            return Err("Environment name cannot be empty".to_string());
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(format!("Invalid log level: {}", self.log_level));
        }

        if let Some(format) = &self.log_format {
            if !LOG_FORMATS.contains(&format.as_str()) {
                return Err(format!("Invalid log format: {}", format));
            }
        }

        Ok(())
    }
}
