//! # Application Error Types
//!
//! This module defines common error types used throughout the recipe catalogue.
//! The parsing core itself is total; these errors cover configuration loading,
//! shopping-list validation and the command-line entry point.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (scale factors, inputs, etc.)
    Validation(String),
    /// File system and stream errors
    Io(String),
    /// Internal application errors
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Io(msg) => write!(f, "[IO] {}", msg),
            AppError::Internal(msg) => write!(f, "[INTERNAL] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::error;

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }

    /// Log validation errors with input context
    pub fn log_validation_error(
        error: &impl std::fmt::Display,
        operation: &str,
        input_type: &str,
        input_value: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            input_type = %input_type,
            input_value = ?input_value.map(|v| if v.chars().count() > 100 { format!("{}...", v.chars().take(100).collect::<String>()) } else { v.to_string() }),
            "Validation failed"
        );
    }

    /// Log internal application errors with component context
    pub fn log_internal_error(error: &impl std::fmt::Display, component: &str, operation: &str) {
        error!(
            error = %error,
            component = %component,
            operation = %operation,
            "Internal application error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_prefixes() {
        assert_eq!(
            AppError::Config("bad tolerance".to_string()).to_string(),
            "[CONFIG] bad tolerance"
        );
        assert_eq!(
            AppError::Validation("scale too small".to_string()).to_string(),
            "[VALIDATION] scale too small"
        );
        assert_eq!(AppError::Io("missing".to_string()).to_string(), "[IO] missing");
    }

    #[test]
    fn test_error_conversions() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        assert!(matches!(AppError::from(io_err), AppError::Io(_)));

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(AppError::from(json_err), AppError::Config(_)));

        let any_err = anyhow::anyhow!("boom");
        assert_eq!(AppError::from(any_err), AppError::Internal("boom".to_string()));
    }
}
