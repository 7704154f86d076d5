//! # Quantity Formatting
//!
//! Renders a (possibly scaled) quantity as culinary text, preferring the common
//! kitchen fractions over decimals:
//!
//! ```rust
//! use recipe_catalogue::quantity_format::format_quantity;
//!
//! assert_eq!(format_quantity(2.0), "2");
//! assert_eq!(format_quantity(1.5), "1 1/2");
//! assert_eq!(format_quantity(0.25), "1/4");
//! assert_eq!(format_quantity(2.3), "2.3");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Canonical fractions in match order
const CANONICAL_FRACTIONS: [(f64, &str); 5] = [
    (1.0 / 4.0, "1/4"),
    (1.0 / 3.0, "1/3"),
    (1.0 / 2.0, "1/2"),
    (2.0 / 3.0, "2/3"),
    (3.0 / 4.0, "3/4"),
];

/// Tolerances used when rendering quantities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Distance from a whole number under which the value renders as an integer
    pub whole_tolerance: f64,
    /// Distance from a canonical fraction under which that fraction is used
    pub fraction_tolerance: f64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            whole_tolerance: 0.01,
            fraction_tolerance: 0.05,
        }
    }
}

impl FormatConfig {
    /// Validate formatting tolerances
    pub fn validate(&self) -> AppResult<()> {
        let check = |value: f64, key: &str| -> AppResult<()> {
            if !value.is_finite() || value <= 0.0 || value >= 0.5 {
                return Err(AppError::Config(format!(
                    "{} must be greater than 0 and less than 0.5, got {}",
                    key, value
                )));
            }
            Ok(())
        };

        check(self.whole_tolerance, "whole_tolerance")?;
        check(self.fraction_tolerance, "fraction_tolerance")?;
        Ok(())
    }
}

/// Quantity formatter with configurable tolerances
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuantityFormatter {
    config: FormatConfig,
}

impl QuantityFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a formatter with custom tolerances
    pub fn with_config(config: FormatConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Format a non-negative quantity
    ///
    /// 1. Near-integers render without a decimal point.
    /// 2. Otherwise the fractional part is compared with 1/4, 1/3, 1/2, 2/3 and
    ///    3/4 in that order; the first close match renders as `"<whole> <frac>"`,
    ///    or just `"<frac>"` when the whole part is zero.
    /// 3. Anything else renders with one decimal place, minus a trailing `.0`.
    pub fn format(&self, value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() < self.config.whole_tolerance {
            return format!("{:.0}", rounded);
        }

        let whole = value.floor();
        let remainder = value - whole;

        let fraction = CANONICAL_FRACTIONS
            .iter()
            .find(|(target, _)| (remainder - target).abs() < self.config.fraction_tolerance)
            .map(|(_, label)| *label);

        if let Some(fraction) = fraction {
            return if whole > 0.0 {
                format!("{:.0} {}", whole, fraction)
            } else {
                fraction.to_string()
            };
        }

        let text = format!("{:.1}", value);
        match text.strip_suffix(".0") {
            Some(stripped) => stripped.to_string(),
            None => text,
        }
    }

    /// Format `quantity * scale`
    pub fn format_scaled(&self, quantity: f64, scale: f64) -> String {
        self.format(quantity * scale)
    }
}

/// Format a quantity with the default tolerances
pub fn format_quantity(value: f64) -> String {
    QuantityFormatter::new().format(value)
}
