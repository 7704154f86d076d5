use recipe_catalogue::errors::AppError;
use recipe_catalogue::pantry::StapleClassifier;
use recipe_catalogue::quantity_format::{FormatConfig, QuantityFormatter};
use recipe_catalogue::shopping_list::{ExportScope, ShoppingList, ShoppingListConfig};
use recipe_catalogue::text_processing::IngredientLineParser;

const WEEKLY_LIST: &str = "- [ ] 2 onions\n- [ ] 1/2 cup sugar\n- [ ] 1/3 cup olive oil\n- [ ] 3 carrots\n- [ ] fresh basil";

#[test]
fn test_default_selection_excludes_staples() {
    let list = ShoppingList::parse(WEEKLY_LIST);

    let checked: Vec<&str> = list.checked_items().map(|i| i.name.as_str()).collect();
    assert_eq!(checked, vec!["onions", "carrots", "fresh basil"]);

    let pantry: Vec<&str> = list.pantry_items().map(|i| i.name.as_str()).collect();
    assert_eq!(pantry, vec!["cup sugar", "cup olive oil"]);
}

#[test]
fn test_checked_export_text() {
    let list = ShoppingList::parse(WEEKLY_LIST);
    let export = list.export(ExportScope::Checked);

    assert_eq!(export.text, "- [ ] 2 onions\n- [ ] 3 carrots\n- [ ] fresh basil");
}

#[test]
fn test_scaled_export_of_all_items() {
    let mut list = ShoppingList::parse(WEEKLY_LIST);
    list.set_scale(1.5).unwrap();

    let export = list.export(ExportScope::All);
    assert_eq!(
        export.text,
        "- [ ] 3 onions\n- [ ] 3/4 cup sugar\n- [ ] 1/2 cup olive oil\n- [ ] 4 1/2 carrots\n- [ ] fresh basil"
    );
}

#[test]
fn test_html_export_structure() {
    let mut list = ShoppingList::parse("2 onions\nsalt");
    list.toggle("item-1");

    let export = list.export(ExportScope::Checked);
    assert_eq!(
        export.html,
        "<ul class=\"checklist\" style=\"list-style-type: none; padding: 0;\">\n\
         <li><input type=\"checkbox\" /> 2 onions</li>\n\
         <li><input type=\"checkbox\" /> salt</li>\n\
         </ul>"
    );
}

#[test]
fn test_toggle_changes_export() {
    let mut list = ShoppingList::parse(WEEKLY_LIST);

    assert_eq!(list.toggle("item-0"), Some(false));
    assert_eq!(list.toggle("item-1"), Some(true));

    let export = list.export(ExportScope::Checked);
    assert_eq!(export.text, "- [ ] 1/2 cup sugar\n- [ ] 3 carrots\n- [ ] fresh basil");
}

#[test]
fn test_rejected_scale_keeps_previous_value() {
    let mut list = ShoppingList::parse(WEEKLY_LIST);
    list.set_scale(2.0).unwrap();

    let result = list.set_scale(0.1);
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(list.scale(), 2.0);
}

#[test]
fn test_custom_collaborators() {
    let parser = IngredientLineParser::with_classifier(StapleClassifier::with_terms(["basil"]));
    let formatter = QuantityFormatter::with_config(FormatConfig {
        whole_tolerance: 0.01,
        fraction_tolerance: 0.01,
    })
    .unwrap();
    let config = ShoppingListConfig {
        min_scale: 0.25,
        max_scale: 4.0,
        default_scale: 1.0,
    };

    let mut list = ShoppingList::from_text("0.3 cup sugar\nfresh basil", &parser, formatter, config);
    assert!(list.set_scale(0.25).is_ok());
    assert!(list.set_scale(5.0).is_err());
    list.set_scale(1.0).unwrap();

    // 0.3 is 0.033 away from 1/3, outside the tighter tolerance
    let export = list.export(ExportScope::All);
    assert_eq!(export.text, "- [ ] 0.3 cup sugar\n- [ ] fresh basil");

    let checked: Vec<&str> = list.checked_items().map(|i| i.name.as_str()).collect();
    assert_eq!(checked, vec!["cup sugar"]);
}

#[test]
fn test_export_serializes_to_json() {
    let list = ShoppingList::parse("2 onions");
    let export = list.export(ExportScope::Checked);

    let json = serde_json::to_value(&export).unwrap();
    assert_eq!(json["text"], "- [ ] 2 onions");
    assert_eq!(serde_json::to_value(ExportScope::All).unwrap(), "all");
}
