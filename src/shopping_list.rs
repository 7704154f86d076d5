//! # Shopping List
//!
//! Holds the parsed items of one ingredient or shopping-list field together
//! with the user's scale factor and per-item checked state, and renders the
//! "copy" output (a `- [ ]` text checklist and its HTML counterpart).
//!
//! ```rust
//! use recipe_catalogue::shopping_list::{ExportScope, ShoppingList};
//!
//! let mut list = ShoppingList::parse("- [ ] 1/2 cup sugar\n- [ ] 2 onions\n- [ ] salt");
//! list.set_scale(3.0)?;
//!
//! let export = list.export(ExportScope::Checked);
//! assert_eq!(export.text, "- [ ] 6 onions");
//!
//! let export = list.export(ExportScope::All);
//! assert_eq!(export.text, "- [ ] 1 1/2 cup sugar\n- [ ] 6 onions\n- [ ] salt");
//! # Ok::<(), recipe_catalogue::errors::AppError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{error_logging, AppError, AppResult};
use crate::observability;
use crate::quantity_format::QuantityFormatter;
use crate::text_processing::{IngredientLineParser, ParsedItem};

/// Opening tag of the HTML checklist
const HTML_LIST_OPEN: &str = r#"<ul class="checklist" style="list-style-type: none; padding: 0;">"#;

/// Scale factor bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListConfig {
    /// Smallest accepted scale factor
    pub min_scale: f64,
    /// Largest accepted scale factor
    pub max_scale: f64,
    /// Scale factor of a freshly parsed list
    pub default_scale: f64,
}

impl Default for ShoppingListConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.5,
            max_scale: 10.0,
            default_scale: 1.0,
        }
    }
}

impl ShoppingListConfig {
    /// Validate scale bounds
    pub fn validate(&self) -> AppResult<()> {
        if !self.min_scale.is_finite() || !self.max_scale.is_finite() || !self.default_scale.is_finite() {
            return Err(AppError::Config("Scale bounds must be finite numbers".to_string()));
        }

        if self.min_scale <= 0.0 {
            return Err(AppError::Config("min_scale must be greater than 0".to_string()));
        }

        if self.min_scale > self.max_scale {
            return Err(AppError::Config(
                "min_scale cannot be greater than max_scale".to_string(),
            ));
        }

        if self.default_scale < self.min_scale || self.default_scale > self.max_scale {
            return Err(AppError::Config(format!(
                "default_scale {} must lie between {} and {}",
                self.default_scale, self.min_scale, self.max_scale
            )));
        }

        Ok(())
    }
}

/// Which items an export includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportScope {
    /// Only checked items (shopping-list copy)
    Checked,
    /// Every item (ingredient-list copy)
    All,
}

impl ExportScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportScope::Checked => "checked",
            ExportScope::All => "all",
        }
    }
}

/// Clipboard payload in both plain-text and HTML form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardExport {
    pub text: String,
    pub html: String,
}

/// Parsed items plus caller-side scale and checked state
#[derive(Debug, Clone)]
pub struct ShoppingList {
    items: Vec<ParsedItem>,
    scale: f64,
    formatter: QuantityFormatter,
    config: ShoppingListConfig,
}

impl ShoppingList {
    /// Parse `text` with the default parser, formatter and scale bounds
    pub fn parse(text: &str) -> Self {
        Self::from_text(
            text,
            &IngredientLineParser::new(),
            QuantityFormatter::new(),
            ShoppingListConfig::default(),
        )
    }

    /// Parse `text` with explicit collaborators
    pub fn from_text(
        text: &str,
        parser: &IngredientLineParser,
        formatter: QuantityFormatter,
        config: ShoppingListConfig,
    ) -> Self {
        let items = parser.parse_block(text);
        info!(
            item_count = items.len(),
            checked_count = items.iter().filter(|i| i.is_checked).count(),
            "Built shopping list"
        );
        Self {
            items,
            scale: config.default_scale,
            formatter,
            config,
        }
    }

    pub fn items(&self) -> &[ParsedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Change the scale factor
    ///
    /// Values outside `[min_scale, max_scale]` are rejected and the current
    /// scale is kept.
    pub fn set_scale(&mut self, scale: f64) -> AppResult<()> {
        if !scale.is_finite() || scale < self.config.min_scale || scale > self.config.max_scale {
            let err = AppError::Validation(format!(
                "Scale {} is outside the allowed range {}..={}",
                scale, self.config.min_scale, self.config.max_scale
            ));
            error_logging::log_validation_error(&err, "set_scale", "scale", Some(scale.to_string().as_str()));
            return Err(err);
        }

        debug!(from = self.scale, to = scale, "Updated shopping list scale");
        self.scale = scale;
        Ok(())
    }

    /// Flip the checked state of the item with `id`, returning the new state
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        let checked = item.toggle();
        debug!(id = %id, checked, "Toggled shopping list item");
        observability::record_item_toggle(checked);
        Some(checked)
    }

    /// Items currently selected
    pub fn checked_items(&self) -> impl Iterator<Item = &ParsedItem> {
        self.items.iter().filter(|item| item.is_checked)
    }

    /// Items flagged as pantry staples
    pub fn pantry_items(&self) -> impl Iterator<Item = &ParsedItem> {
        self.items.iter().filter(|item| item.is_standard)
    }

    /// Scaled, formatted quantity of `item`
    pub fn display_quantity(&self, item: &ParsedItem) -> Option<String> {
        item.scaled_quantity(self.scale)
            .map(|quantity| self.formatter.format(quantity))
    }

    /// `"<quantity> <name>"`, or just the name when there is no quantity
    pub fn display_text(&self, item: &ParsedItem) -> String {
        match self.display_quantity(item) {
            Some(quantity) => format!("{} {}", quantity, item.name),
            None => item.name.clone(),
        }
    }

    /// Render the clipboard payload for `scope`
    pub fn export(&self, scope: ExportScope) -> ClipboardExport {
        let lines: Vec<String> = self
            .items
            .iter()
            .filter(|item| scope == ExportScope::All || item.is_checked)
            .map(|item| self.display_text(item))
            .collect();

        let text = lines
            .iter()
            .map(|line| format!("- [ ] {}", line))
            .collect::<Vec<_>>()
            .join("\n");

        let html_items = lines
            .iter()
            .map(|line| format!(r#"<li><input type="checkbox" /> {}</li>"#, escape_html(line)))
            .collect::<Vec<_>>()
            .join("\n");
        let html = format!("{}\n{}\n</ul>", HTML_LIST_OPEN, html_items);

        debug!(scope = scope.as_str(), item_count = lines.len(), "Exported shopping list");
        observability::record_export_metrics(scope.as_str(), lines.len());

        ClipboardExport { text, html }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text() {
        let list = ShoppingList::parse("");
        assert!(list.is_empty());
        assert_eq!(list.scale(), 1.0);

        let export = list.export(ExportScope::All);
        assert_eq!(export.text, "");
        assert_eq!(export.html, format!("{}\n\n</ul>", HTML_LIST_OPEN));
    }

    #[test]
    fn test_scale_bounds() {
        let mut list = ShoppingList::parse("2 onions");

        assert!(list.set_scale(0.5).is_ok());
        assert!(list.set_scale(10.0).is_ok());
        assert!(matches!(list.set_scale(0.25), Err(AppError::Validation(_))));
        assert!(list.set_scale(10.5).is_err());
        assert!(list.set_scale(f64::NAN).is_err());
        assert_eq!(list.scale(), 10.0);
    }

    #[test]
    fn test_toggle_by_id() {
        let mut list = ShoppingList::parse("2 onions\nsalt");

        assert_eq!(list.checked_items().count(), 1);
        assert_eq!(list.toggle("item-1"), Some(true));
        assert_eq!(list.checked_items().count(), 2);
        assert_eq!(list.toggle("item-0"), Some(false));
        assert_eq!(list.toggle("item-9"), None);
        assert_eq!(list.pantry_items().count(), 1);
    }

    #[test]
    fn test_display_text() {
        let mut list = ShoppingList::parse("1/2 cup sugar\nfresh basil");
        list.set_scale(2.0).unwrap();

        let items = list.items().to_vec();
        assert_eq!(list.display_quantity(&items[0]), Some("1".to_string()));
        assert_eq!(list.display_text(&items[0]), "1 cup sugar");
        assert_eq!(list.display_quantity(&items[1]), None);
        assert_eq!(list.display_text(&items[1]), "fresh basil");
    }

    #[test]
    fn test_html_export_escapes_text() {
        let list = ShoppingList::parse("1 tin \"San Marzano\" tomatoes <400g> & basil");
        let export = list.export(ExportScope::Checked);

        assert_eq!(
            export.html,
            format!(
                "{}\n<li><input type=\"checkbox\" /> 1 tin &quot;San Marzano&quot; tomatoes &lt;400g&gt; &amp; basil</li>\n</ul>",
                HTML_LIST_OPEN
            )
        );
        assert_eq!(export.text, "- [ ] 1 tin \"San Marzano\" tomatoes <400g> & basil");
    }

    #[test]
    fn test_config_validation() {
        assert!(ShoppingListConfig::default().validate().is_ok());

        let invalid = [
            ShoppingListConfig { min_scale: 0.0, ..Default::default() },
            ShoppingListConfig { min_scale: 5.0, max_scale: 2.0, default_scale: 3.0 },
            ShoppingListConfig { default_scale: 20.0, ..Default::default() },
            ShoppingListConfig { max_scale: f64::INFINITY, ..Default::default() },
        ];
        for config in invalid {
            assert!(config.validate().is_err(), "accepted {:?}", config);
        }
    }
}
