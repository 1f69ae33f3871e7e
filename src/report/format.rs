//! Formatted terminal output.
//!
//! Formatting lives in one place so output changes stay localized and the
//! pipeline code stays testable.

use crate::domain::OptimizationRequest;
use crate::report::Assignments;

/// Render assignments as a two-column Markdown table (`Bin | Items`).
///
/// This is the deterministic fallback for the LLM renderer; both produce the
/// same logical table.
pub fn markdown_table(assignments: &Assignments) -> String {
    let mut out = String::new();
    out.push_str("| Bin | Items |\n");
    out.push_str("| --- | --- |\n");
    for (bin, items) in &assignments.bins {
        let items = if items.is_empty() {
            "(empty)".to_string()
        } else {
            items.join(", ")
        };
        out.push_str(&format!("| {bin} | {items} |\n"));
    }
    out
}

/// Summarize a parsed request before it is sent to the optimizer.
pub fn run_summary(request: &OptimizationRequest) -> String {
    let mut out = String::new();

    out.push_str("=== pack - Inventory Optimization ===\n");
    let total_items: u32 = request.item_types.iter().map(|i| i.quantity).sum();
    out.push_str(&format!(
        "Item types: {} ({} items total)\n",
        request.item_types.len(),
        total_items
    ));
    for item in &request.item_types {
        out.push_str(&format!(
            "  item {}: {}x{} price={} qty={}\n",
            item.number, item.width, item.height, item.price, item.quantity
        ));
    }
    out.push_str(&format!("Bin types: {}\n", request.bin_types.len()));
    for bin in &request.bin_types {
        out.push_str(&format!("  bin {}: {}x{}\n", bin.number, bin.width, bin.height));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markdown_table_has_header_and_rows() {
        let assignments = Assignments {
            bins: vec![
                ("bin1".to_string(), vec!["1".into(), "4".into()]),
                ("bin2".to_string(), vec![]),
            ],
        };
        let table = markdown_table(&assignments);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines[0], "| Bin | Items |");
        assert_eq!(lines[1], "| --- | --- |");
        assert_eq!(lines[2], "| bin1 | 1, 4 |");
        assert_eq!(lines[3], "| bin2 | (empty) |");
    }
}
