//! # Text Processing Module
//!
//! This module turns free-text ingredient and shopping-list lines into
//! structured, scalable line items.
//!
//! ## Features
//!
//! - **Markup cleaning**: strips `[ ]` checkboxes, leading hyphens and bullets
//! - **Quantity extraction**: leading integers, decimals and `a/b` fractions
//! - **Pantry classification**: flags staples such as salt, oil and flour
//! - **Block parsing**: one item per non-blank line, in input order
//!
//! ## Usage
//!
//! ```rust
//! use recipe_catalogue::text_processing::parse_block;
//!
//! let items = parse_block("- [ ] 2 onions\n\n- [ ] 1/2 cup sugar");
//!
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].quantity, Some(2.0));
//! assert_eq!(items[0].name, "onions");
//! assert_eq!(items[1].quantity, Some(0.5));
//! assert!(items[1].is_standard);
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::pantry::StapleClassifier;

lazy_static! {
    /// Empty checkbox markers anywhere in a line: `[ ]`, `[]`
    static ref CHECKBOX_REGEX: Regex =
        Regex::new(r"\[\s*\]").expect("Checkbox pattern should be valid");
    /// Every leading hyphen, bullet (`*`, `•`) and whitespace character
    static ref LEADING_MARKUP_REGEX: Regex =
        Regex::new(r"^[\s*•-]+").expect("Leading markup pattern should be valid");
    /// Leading quantity: a fraction or an integer/decimal, then the rest of the line.
    /// The fraction alternative comes first so "1/2" is not read as "1".
    static ref QUANTITY_REGEX: Regex =
        Regex::new(r"(?s)^(?P<quantity>[0-9]+/[0-9]+|[0-9]+(?:\.[0-9]+)?)\s*(?P<rest>.*)$")
            .expect("Quantity pattern should be valid");
}

/// A structured ingredient or shopping-list line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedItem {
    /// The untouched input line
    pub original: String,
    /// Line text after markup and quantity removal (may still hold a unit, e.g. "cups flour")
    pub name: String,
    /// Leading quantity, if any
    pub quantity: Option<f64>,
    /// Reserved for unit extraction; never populated
    pub unit: Option<String>,
    /// Whether the item is a pantry staple
    pub is_standard: bool,
    /// Selection state, initially `!is_standard`
    pub is_checked: bool,
    /// Positional identifier, unique within one parse pass
    pub id: String,
}

impl ParsedItem {
    /// Quantity multiplied by `scale`
    pub fn scaled_quantity(&self, scale: f64) -> Option<f64> {
        self.quantity.map(|q| q * scale)
    }

    /// Flip the checked state and return the new value
    pub fn toggle(&mut self) -> bool {
        self.is_checked = !self.is_checked;
        self.is_checked
    }
}

/// Identifier for the item at `position` within a parse pass
pub fn item_id(position: usize) -> String {
    format!("item-{}", position)
}

/// Strip checkbox markers anywhere in the line, then all leading hyphens,
/// bullets and whitespace, then trailing whitespace
///
/// Checkbox removal repeats until nothing matches, since deleting one marker
/// can close another (`"[[ ]]"` becomes `"[]"`). Dropping a prefix cannot form
/// a new marker, so a single anchored strip finishes the job and the result
/// is a fixed point: cleaning it again returns it unchanged (`"  - [ ] salt"`
/// and `"- * salt"` both give `"salt"`).
///
/// # Examples
///
/// ```rust
/// use recipe_catalogue::text_processing::clean_line;
///
/// assert_eq!(clean_line("- [ ] 2 onions"), "2 onions");
/// assert_eq!(clean_line("• olive oil"), "olive oil");
/// assert_eq!(clean_line("   "), "");
/// ```
pub fn clean_line(line: &str) -> String {
    let mut current = CHECKBOX_REGEX.replace_all(line, "").into_owned();
    while CHECKBOX_REGEX.is_match(&current) {
        current = CHECKBOX_REGEX.replace_all(&current, "").into_owned();
    }

    LEADING_MARKUP_REGEX
        .replace(&current, "")
        .trim_end()
        .to_string()
}

/// Interpret a quantity token: `a/b` fractions or plain decimals
///
/// A zero denominator yields `0`. Returns `None` for anything that is not a
/// number.
pub fn parse_quantity(token: &str) -> Option<f64> {
    if let Some((numerator, denominator)) = token.split_once('/') {
        let numerator: f64 = numerator.trim().parse().ok()?;
        let denominator: f64 = denominator.trim().parse().ok()?;
        if denominator == 0.0 {
            return Some(0.0);
        }
        return Some(numerator / denominator);
    }
    token.trim().parse().ok()
}

/// Split a cleaned line into its leading quantity and the remainder
///
/// Expects input already trimmed by [`clean_line`]; leading whitespace
/// prevents a match.
///
/// # Examples
///
/// ```rust
/// use recipe_catalogue::text_processing::extract_quantity;
///
/// assert_eq!(extract_quantity("1.5 cups flour"), (Some(1.5), "cups flour"));
/// assert_eq!(extract_quantity("3/0 eggs"), (Some(0.0), "eggs"));
/// assert_eq!(extract_quantity("a pinch of salt"), (None, "a pinch of salt"));
/// ```
pub fn extract_quantity(cleaned: &str) -> (Option<f64>, &str) {
    let Some(captures) = QUANTITY_REGEX.captures(cleaned) else {
        return (None, cleaned);
    };

    let token = captures.name("quantity").map_or("", |m| m.as_str());
    let rest = captures.name("rest").map_or("", |m| m.as_str());

    match parse_quantity(token) {
        Some(quantity) => (Some(quantity), rest),
        None => {
            debug!("Unparseable quantity token '{}', keeping full line", token);
            (None, cleaned)
        }
    }
}

/// Ingredient line parser with a configurable staple vocabulary
#[derive(Debug, Clone, Default)]
pub struct IngredientLineParser {
    classifier: StapleClassifier,
}

impl IngredientLineParser {
    /// Create a parser using the built-in staple vocabulary
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with a custom staple classifier
    ///
    /// # Examples
    ///
    /// ```rust
    /// use recipe_catalogue::pantry::StapleClassifier;
    /// use recipe_catalogue::text_processing::IngredientLineParser;
    ///
    /// let parser = IngredientLineParser::with_classifier(StapleClassifier::with_terms(["butter"]));
    /// let item = parser.parse_line("250 g unsalted butter", 0);
    ///
    /// assert!(item.is_standard);
    /// assert!(!item.is_checked);
    /// ```
    pub fn with_classifier(classifier: StapleClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &StapleClassifier {
        &self.classifier
    }

    /// Parse one line into a [`ParsedItem`]
    ///
    /// clean → extract quantity → classify the remainder. The id is derived
    /// from `position` only, so re-parsing unchanged text yields equal items.
    pub fn parse_line(&self, line: &str, position: usize) -> ParsedItem {
        let cleaned = clean_line(line);
        let (quantity, rest) = extract_quantity(&cleaned);
        let is_standard = self.classifier.is_standard(rest);

        trace!(
            position,
            quantity = ?quantity,
            name = %rest,
            is_standard,
            "Parsed ingredient line"
        );

        ParsedItem {
            original: line.to_string(),
            name: rest.to_string(),
            quantity,
            unit: None,
            is_standard,
            is_checked: !is_standard,
            id: item_id(position),
        }
    }

    /// Parse a newline-separated block, skipping blank lines
    ///
    /// Positions (and so ids) count only the kept lines.
    pub fn parse_block(&self, block: &str) -> Vec<ParsedItem> {
        let _span = crate::observability::text_processing_span("parse_block").entered();
        let start_time = std::time::Instant::now();
        let line_count = block.split('\n').count();

        let items: Vec<ParsedItem> = block
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(position, line)| self.parse_line(line, position))
            .collect();

        debug!(
            line_count,
            item_count = items.len(),
            staple_count = items.iter().filter(|i| i.is_standard).count(),
            "Parsed ingredient block"
        );

        crate::observability::record_text_processing_metrics(
            "parse_block",
            start_time.elapsed(),
            block.len(),
            line_count,
            items.len(),
        );

        items
    }
}

lazy_static! {
    static ref DEFAULT_PARSER: IngredientLineParser = IngredientLineParser::new();
}

/// Parse one line with the built-in staple vocabulary
pub fn parse_line(line: &str, position: usize) -> ParsedItem {
    DEFAULT_PARSER.parse_line(line, position)
}

/// Parse a block with the built-in staple vocabulary
pub fn parse_block(block: &str) -> Vec<ParsedItem> {
    DEFAULT_PARSER.parse_block(block)
}
