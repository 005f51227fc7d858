use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use demog_transform::DropReason;

use crate::types::{CleanResult, MetadataResult};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn count_row(table: &mut Table, label: &str, count: usize) {
    table.add_row(vec![
        Cell::new(label),
        Cell::new(count).set_alignment(CellAlignment::Right),
    ]);
}

pub fn print_metadata_summary(result: &MetadataResult) {
    println!("Catalog: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Repair step"), header_cell("Count")]);
    apply_table_style(&mut table);
    count_row(&mut table, "Attribute/value rows", result.value_rows);
    count_row(&mut table, "Information-level rows", result.level_rows);
    count_row(&mut table, "Repaired attribute names", result.repaired_names);
    count_row(&mut table, "Catalog rows", result.catalog_rows);
    count_row(&mut table, "Distinct attributes", result.attributes);
    println!("{table}");
}

pub fn print_clean_summary(result: &CleanResult) {
    let report = &result.report;
    println!("Output: {}", result.output.display());
    let mut table = Table::new();
    table.set_header(vec![header_cell("Stage"), header_cell("Effect")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Input"),
        Cell::new(format!("{} rows x {} columns", report.rows_in, report.columns_in)),
    ]);
    table.add_row(vec![
        Cell::new("Unknown codes"),
        Cell::new(format!(
            "{} cells nulled across {} columns",
            report.unknown_cells_nulled, report.unknown_columns_matched
        )),
    ]);
    for reason in [
        DropReason::Identifier,
        DropReason::CustomerOnly,
        DropReason::HighNull,
        DropReason::Correlated,
    ] {
        let count = report.dropped_count(reason);
        if count > 0 {
            table.add_row(vec![
                Cell::new(format!("Dropped ({})", reason.label())).fg(Color::Red),
                Cell::new(format!("{count} columns")),
            ]);
        }
    }
    if report.rows_dropped_sparse > 0 {
        table.add_row(vec![
            Cell::new("Sparse rows").fg(Color::Red),
            Cell::new(format!("{} rows dropped", report.rows_dropped_sparse)),
        ]);
    }
    if report.sentinel_cells_nulled > 0 {
        table.add_row(vec![
            Cell::new("Sentinels"),
            Cell::new(format!("{} cells nulled", report.sentinel_cells_nulled)),
        ]);
    }
    if !report.indicator_columns.is_empty() {
        table.add_row(vec![
            Cell::new("Indicators"),
            Cell::new(format!("{} columns added", report.indicator_columns.len())),
        ]);
    }
    table.add_row(vec![
        Cell::new("Imputed"),
        Cell::new(format!("{} columns", report.imputed_columns.len())),
    ]);
    if !report.missing_columns.is_empty() {
        table.add_row(vec![
            Cell::new("Skipped (absent)").fg(Color::Yellow),
            Cell::new(report.missing_columns.join(", ")),
        ]);
    }
    table.add_row(vec![
        Cell::new("Output").add_attribute(Attribute::Bold),
        Cell::new(format!(
            "{} rows x {} columns",
            report.rows_out, report.columns_out
        ))
        .add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}
