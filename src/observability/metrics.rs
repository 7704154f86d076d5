//! Metrics recording functions.
//!
//! All functions go through the `metrics` facade; without an installed
//! recorder they do nothing.

/// Record text processing performance metrics
pub fn record_text_processing_metrics(
    operation: &str,
    duration: std::time::Duration,
    text_length: usize,
    line_count: usize,
    items_found: usize,
) {
    let operation = operation.to_string();
    metrics::counter!("text_processing_operations_total", "operation" => operation.clone())
        .increment(1);
    metrics::histogram!("text_processing_duration_seconds", "operation" => operation.clone())
        .record(duration.as_secs_f64());
    metrics::histogram!("text_processing_input_length", "operation" => operation.clone())
        .record(text_length as f64);
    metrics::histogram!("text_processing_line_count", "operation" => operation.clone())
        .record(line_count as f64);
    metrics::histogram!("text_processing_items_found", "operation" => operation)
        .record(items_found as f64);
}

/// Record a shopping list export
pub fn record_export_metrics(scope: &str, item_count: usize) {
    let scope = scope.to_string();
    metrics::counter!("shopping_list_exports_total", "scope" => scope.clone()).increment(1);
    metrics::histogram!("shopping_list_export_items", "scope" => scope)
        .record(item_count as f64);
}

/// Record an item toggle
pub fn record_item_toggle(checked: bool) {
    let state = if checked { "checked" } else { "unchecked" };
    metrics::counter!("shopping_list_item_toggles_total", "state" => state).increment(1);
}
