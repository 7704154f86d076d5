//! # Recipe Catalogue
//!
//! Ingredient-line parsing and quantity scaling for a personal recipe
//! catalogue: turns free-text ingredient and shopping-list fields into
//! structured items, flags pantry staples, scales quantities and renders
//! them back as kitchen fractions for copying.

pub mod config;
pub mod errors;
pub mod observability;
pub mod observability_config;
pub mod pantry;
pub mod quantity_format;
pub mod shopping_list;
pub mod text_processing;

// Re-export types for easier access
pub use pantry::{is_standard_item, StapleClassifier};
pub use quantity_format::{format_quantity, QuantityFormatter};
pub use shopping_list::{ClipboardExport, ExportScope, ShoppingList, ShoppingListConfig};
pub use text_processing::{clean_line, parse_block, parse_line, IngredientLineParser, ParsedItem};
