//! Terminal tables for the `airrep` subcommands.

use airrep_core::LoadedReport;
use airrep_ingest::{DiscoveredReport, any_to_string};
use airrep_model::ReportKind;
use airrep_transform::ReportFrame;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::AnyValue;

/// Longest cell text shown in the row preview.
const PREVIEW_CELL_WIDTH: usize = 32;

pub fn kinds_table() -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Kind"),
        header_cell("Report"),
        header_cell("Default file"),
        header_cell("Preamble"),
        header_cell("Trailer"),
        header_cell("Cached"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Center);
    for kind in ReportKind::ALL {
        let spec = kind.spec();
        table.add_row(vec![
            Cell::new(kind.slug()).add_attribute(Attribute::Bold),
            Cell::new(kind.label()),
            Cell::new(kind.default_file_name()),
            Cell::new(spec.preamble_lines),
            Cell::new(spec.trailer_rows),
            flag_cell(spec.persist_processed),
        ]);
    }
    table
}

pub fn discovery_table(reports: &[DiscoveredReport]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Kind")]);
    apply_table_style(&mut table);
    for report in reports {
        let kind = match report.kind {
            Some(kind) => Cell::new(kind.slug()).fg(Color::Green),
            None => dim_cell("unrecognized"),
        };
        table.add_row(vec![Cell::new(report.file_name()), kind]);
    }
    table
}

/// Metadata values, `unknown` when the preamble did not carry them.
pub fn metadata_table(frame: &ReportFrame) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metadata"), header_cell("Value")]);
    apply_table_style(&mut table);
    for (key, value) in frame.metadata.iter() {
        let cell = if value.is_null() {
            Cell::new(value).fg(Color::Yellow)
        } else {
            Cell::new(value)
        };
        table.add_row(vec![Cell::new(key), cell]);
    }
    table
}

pub fn coercion_table(frame: &ReportFrame) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Parsed"),
        header_cell("Blank"),
        header_cell("Invalid"),
    ]);
    apply_table_style(&mut table);
    for idx in 1..=3 {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for (field, counts) in frame.coercion.iter() {
        table.add_row(vec![
            Cell::new(field),
            Cell::new(counts.parsed),
            count_cell(counts.missing, Color::DarkYellow),
            count_cell(counts.invalid, Color::Red),
        ]);
    }
    table
}

/// The first `rows` rows of the canonical table.
pub fn preview_table(frame: &ReportFrame, rows: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        frame
            .data
            .get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    let columns = frame.data.get_columns();
    for row in 0..rows.min(frame.record_count()) {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| {
                let value = column.get(row).unwrap_or(AnyValue::Null);
                if matches!(value, AnyValue::Null) {
                    dim_cell("-")
                } else {
                    Cell::new(truncate(&any_to_string(value)))
                }
            })
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn print_load_summary(loaded: &LoadedReport, rows: usize) {
    let frame = &loaded.frame;
    println!("Report: {} ({})", frame.kind.label(), frame.kind);
    println!("Source: {}", frame.source_file.display());
    println!(
        "Records: {}  Columns: {}",
        frame.record_count(),
        frame.data.width()
    );
    if let Some(path) = &loaded.processed_path {
        println!("Processed copy: {}", path.display());
    }
    if !frame.metadata.is_empty() {
        println!("{}", metadata_table(frame));
    }
    println!("{}", coercion_table(frame));
    if rows > 0 && frame.record_count() > 0 {
        println!("{}", preview_table(frame, rows));
        if frame.record_count() > rows {
            println!("... {} more rows", frame.record_count() - rows);
        }
    }
}

fn truncate(text: &str) -> String {
    let flat = text.replace('\n', " | ");
    if flat.chars().count() <= PREVIEW_CELL_WIDTH {
        return flat;
    }
    let mut short: String = flat.chars().take(PREVIEW_CELL_WIDTH - 1).collect();
    short.push('…');
    short
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
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

fn flag_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_cells_and_flattens_newlines() {
        assert_eq!(truncate("admin\nsales"), "admin | sales");
        let long = "x".repeat(40);
        let short = truncate(&long);
        assert_eq!(short.chars().count(), PREVIEW_CELL_WIDTH);
        assert!(short.ends_with('…'));
    }
}
