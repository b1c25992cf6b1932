use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use ldp_cli::types::PipelineResult;
use ldp_model::Severity;

pub fn print_summary(result: &PipelineResult) {
    println!("Output: {}", result.output_dir.display());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Rows in"),
        header_cell("Rows out"),
        header_cell("Duplicates"),
        header_cell("Dropped"),
        header_cell("Invalid IDs"),
        header_cell("Output"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_in = 0usize;
    let mut total_out = 0usize;
    let mut total_dupes = 0usize;
    let mut total_dropped = 0usize;
    for stage in &result.stages {
        total_in += stage.rows_in;
        total_out += stage.rows_out;
        total_dupes += stage.duplicates_removed;
        total_dropped += stage.rows_dropped_missing;
        let output = stage
            .output
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "(dry run)".to_string());
        table.add_row(vec![
            Cell::new(&stage.source)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(stage.rows_in),
            Cell::new(stage.rows_out),
            count_cell(stage.duplicates_removed, Color::Yellow),
            count_cell(stage.rows_dropped_missing, Color::Yellow),
            match stage.invalid_identifiers {
                Some(count) => count_cell(count, Color::Red),
                None => dim_cell("-"),
            },
            Cell::new(output),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_in).add_attribute(Attribute::Bold),
        Cell::new(total_out).add_attribute(Attribute::Bold),
        count_cell(total_dupes, Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(total_dropped, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell(format!("{} ms", result.duration.as_millis())),
    ]);
    println!("{table}");

    if !result.diagnostics.is_empty() {
        println!();
        println!("Findings:");
        for entry in result.diagnostics.iter() {
            match entry.severity {
                Severity::Error => eprintln!("- {entry}"),
                _ => println!("- {entry}"),
            }
        }
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
