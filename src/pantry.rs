//! # Pantry Staple Classification
//!
//! Flags the ingredients most cooks already keep on hand (salt, oil, flour, ...)
//! so shopping lists can default them to "already have".
//!
//! Matching is case-insensitive and whole-word: a staple term must appear in the
//! item name bounded by the start/end of the name or by a single space on each
//! side. `"kosher salt"` and `"salt flakes"` are staples, `"unsalted butter"` and
//! `"saltine crackers"` are not.
//!
//! The vocabulary defaults to [`DEFAULT_STAPLE_TERMS`] and can be replaced from
//! `config/pantry_staples.json`:
//!
//! ```json
//! {
//!   "pantry_staples": {
//!     "terms": ["salt", "pepper", "olive oil"]
//!   }
//! }
//! ```

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::errors::{AppError, AppResult};

/// Built-in staple vocabulary
pub const DEFAULT_STAPLE_TERMS: &[&str] = &[
    "salt",
    "pepper",
    "black pepper",
    "white pepper",
    "oil",
    "olive oil",
    "vegetable oil",
    "sunflower oil",
    "canola oil",
    "water",
    "sugar",
    "flour",
    "spices",
    "spice",
];

/// Pantry staples configuration loaded from JSON
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PantryStaplesConfig {
    pub pantry_staples: PantryStaples,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PantryStaples {
    pub terms: Vec<String>,
}

impl Default for PantryStaplesConfig {
    fn default() -> Self {
        Self {
            pantry_staples: PantryStaples {
                terms: DEFAULT_STAPLE_TERMS.iter().map(|t| t.to_string()).collect(),
            },
        }
    }
}

impl PantryStaplesConfig {
    /// Validate the staple vocabulary
    ///
    /// Terms are matched on single-space boundaries, so a term with leading,
    /// trailing or doubled spaces could never match and is rejected.
    pub fn validate(&self) -> AppResult<()> {
        let terms = &self.pantry_staples.terms;
        if terms.is_empty() {
            return Err(AppError::Config(
                "pantry_staples.terms cannot be empty".to_string(),
            ));
        }

        for (i, term) in terms.iter().enumerate() {
            if term.trim().is_empty() {
                return Err(AppError::Config(format!(
                    "pantry_staples.terms[{}] cannot be empty",
                    i
                )));
            }
            if term.chars().any(|c| c.is_control()) {
                return Err(AppError::Config(format!(
                    "pantry_staples.terms[{}] '{}' contains control characters",
                    i, term
                )));
            }
            if term.starts_with(' ') || term.ends_with(' ') || term.contains("  ") {
                return Err(AppError::Config(format!(
                    "pantry_staples.terms[{}] '{}' has leading, trailing or repeated spaces",
                    i, term
                )));
            }
        }

        Ok(())
    }
}

/// Load pantry staples from a single JSON file, failing on any error
pub fn load_pantry_config_from(path: impl AsRef<Path>) -> AppResult<PantryStaplesConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Io(format!("{}: {}", path.display(), e)))?;
    let config: PantryStaplesConfig = serde_json::from_str(&content)
        .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
    config.validate()?;
    Ok(config)
}

/// Load pantry staples configuration, falling back to the built-in vocabulary
///
/// Lookup order: `PANTRY_STAPLES_CONFIG_PATH`, then `config/pantry_staples.json`
/// and `../config/pantry_staples.json`. A file that cannot be read or parsed is
/// logged and skipped.
pub fn load_pantry_config() -> PantryStaplesConfig {
    load_pantry_config_with(std::env::var("PANTRY_STAPLES_CONFIG_PATH").ok())
}

/// [`load_pantry_config`] with the override path passed in
pub fn load_pantry_config_with(override_path: Option<String>) -> PantryStaplesConfig {
    if let Some(config_path) = override_path {
        info!(
            "Loading pantry staples config from environment variable: {}",
            config_path
        );
        match load_pantry_config_from(&config_path) {
            Ok(config) => return config,
            Err(e) => {
                warn!(
                    "Failed to load pantry staples config from '{}': {}. Falling back to default paths.",
                    config_path, e
                );
            }
        }
    }

    let possible_paths = ["config/pantry_staples.json", "../config/pantry_staples.json"];

    for config_path in &possible_paths {
        if !Path::new(config_path).exists() {
            continue;
        }
        match load_pantry_config_from(config_path) {
            Ok(config) => {
                info!(
                    "Successfully loaded pantry staples config from fallback path: {}",
                    config_path
                );
                return config;
            }
            Err(e) => {
                warn!(
                    "Failed to load pantry staples config at '{}': {}. Trying next path.",
                    config_path, e
                );
            }
        }
    }

    debug!("No pantry staples config file found, using built-in vocabulary");
    PantryStaplesConfig::default()
}

/// Whole-word classifier over a fixed staple vocabulary
#[derive(Debug, Clone, PartialEq)]
pub struct StapleClassifier {
    /// Lower-cased terms, each split on single spaces
    terms: Vec<Vec<String>>,
}

impl StapleClassifier {
    /// Classifier over the built-in vocabulary
    pub fn new() -> Self {
        Self::with_terms(DEFAULT_STAPLE_TERMS.iter().copied())
    }

    /// Classifier over a custom vocabulary
    pub fn with_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| {
                t.as_ref()
                    .to_lowercase()
                    .split(' ')
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .filter(|words| words.iter().any(|w| !w.is_empty()))
            .collect();
        Self { terms }
    }

    /// Classifier from a validated configuration
    pub fn from_config(config: &PantryStaplesConfig) -> AppResult<Self> {
        config.validate()?;
        Ok(Self::with_terms(&config.pantry_staples.terms))
    }

    /// Number of terms in the vocabulary
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether `name` mentions a staple term as a separate word sequence
    pub fn is_standard(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        let words: Vec<&str> = lowered.split(' ').collect();

        let matched = self.terms.iter().any(|term| {
            words.len() >= term.len()
                && words
                    .windows(term.len())
                    .any(|window| window.iter().zip(term).all(|(w, t)| *w == t.as_str()))
        });

        trace!(name = %name, matched, "Classified pantry staple");
        matched
    }
}

impl Default for StapleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    static ref DEFAULT_CLASSIFIER: StapleClassifier = StapleClassifier::new();
}

/// Classify `name` against the built-in vocabulary
pub fn is_standard_item(name: &str) -> bool {
    DEFAULT_CLASSIFIER.is_standard(name)
}
