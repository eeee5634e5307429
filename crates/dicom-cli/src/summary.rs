use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dicom_cli::commands::RunResult;

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.output {
        println!("Output: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Operation"),
        header_cell("Locality"),
        header_cell("Rows before"),
        header_cell("Rows after"),
        header_cell("Removed"),
        header_cell("Columns"),
        header_cell("Added columns"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let removed = result.rows_before.saturating_sub(result.rows_after);
    let added = result.added_columns();
    table.add_row(vec![
        Cell::new(result.operation)
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.locality),
        Cell::new(result.rows_before),
        Cell::new(result.rows_after).add_attribute(Attribute::Bold),
        count_cell(removed, Color::Yellow),
        Cell::new(result.columns_after.len()),
        if added.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(added.join(", ")).fg(Color::Green)
        },
    ]);
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
