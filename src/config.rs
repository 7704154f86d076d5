//! # Unified Application Configuration
//!
//! Collects every tunable of the catalogue (quantity formatting tolerances,
//! scale bounds, the pantry vocabulary and logging) into one structure that
//! is loaded from environment variables and validated before use.

use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use crate::pantry::{load_pantry_config, PantryStaplesConfig, StapleClassifier};
use crate::quantity_format::{FormatConfig, QuantityFormatter};
use crate::shopping_list::ShoppingListConfig;
use crate::text_processing::IngredientLineParser;
use std::env;

/// Parse an optional numeric setting, falling back to `default` when unset
fn parse_f64_setting(key: &str, value: Option<String>, default: f64) -> AppResult<f64> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .map_err(|_| AppError::Config(format!("{} must be a valid number, got '{}'", key, raw))),
    }
}

/// Unified application configuration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    /// Quantity formatting tolerances
    pub format: FormatConfig,
    /// Scale factor bounds
    pub shopping: ShoppingListConfig,
    /// Pantry staple vocabulary
    pub pantry: PantryStaplesConfig,
    /// Observability configuration
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        let mut config = Self::from_settings(|key| env::var(key).ok())?;

        // Load pantry vocabulary (from file)
        config.pantry = load_pantry_config();

        config.observability = ObservabilityConfig::from_env();

        Ok(config)
    }

    /// Build the numeric settings from a key lookup, leaving pantry and
    /// observability at their defaults
    ///
    /// When `SHOPPING_LIST_DEFAULT_SCALE` is unset the default scale is clamped
    /// into the configured bounds; an explicit value is kept as given and
    /// checked by [`AppConfig::validate`].
    pub fn from_settings<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let setting = |key: &str, default: f64| parse_f64_setting(key, lookup(key), default);
        let mut config = Self::default();

        // Load quantity formatting configuration
        config.format.whole_tolerance =
            setting("QUANTITY_WHOLE_TOLERANCE", config.format.whole_tolerance)?;
        config.format.fraction_tolerance =
            setting("QUANTITY_FRACTION_TOLERANCE", config.format.fraction_tolerance)?;

        // Load scale bounds
        config.shopping.min_scale = setting("SHOPPING_LIST_MIN_SCALE", config.shopping.min_scale)?;
        config.shopping.max_scale = setting("SHOPPING_LIST_MAX_SCALE", config.shopping.max_scale)?;
        config.shopping.default_scale = match lookup("SHOPPING_LIST_DEFAULT_SCALE") {
            Some(raw) => parse_f64_setting("SHOPPING_LIST_DEFAULT_SCALE", Some(raw), 1.0)?,
            None => config
                .shopping
                .default_scale
                .max(config.shopping.min_scale)
                .min(config.shopping.max_scale),
        };

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.format.validate()?;
        self.shopping.validate()?;
        self.pantry.validate()?;
        self.observability
            .validate()
            .map_err(|e| AppError::Config(format!("Observability: {}", e)))?;
        Ok(())
    }

    /// Build a line parser over the configured pantry vocabulary
    pub fn parser(&self) -> AppResult<IngredientLineParser> {
        Ok(IngredientLineParser::with_classifier(
            StapleClassifier::from_config(&self.pantry)?,
        ))
    }

    /// Build a quantity formatter with the configured tolerances
    pub fn formatter(&self) -> AppResult<QuantityFormatter> {
        QuantityFormatter::with_config(self.format)
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: environment={}, log_level={}, whole_tolerance={}, fraction_tolerance={}, scale_range={}..={}, pantry_terms={}",
            self.observability.environment,
            self.observability.log_level,
            self.format.whole_tolerance,
            self.format.fraction_tolerance,
            self.shopping.min_scale,
            self.shopping.max_scale,
            self.pantry.pantry_staples.terms.len()
        )
    }
}
