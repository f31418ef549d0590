use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use acoff_cli::project::ValueRow;
use acoff_model::ChoiceDictionary;

pub fn print_choices(field: &str, choices: &ChoiceDictionary) {
    if choices.is_empty() {
        println!("{field}: no choices");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Code"), header_cell("Label")]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (code, label) in choices.iter() {
        table.add_row(vec![Cell::new(code), Cell::new(label)]);
    }
    println!("{table}");
}

pub fn print_values(field: &str, rows: &[ValueRow]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Record"),
        header_cell(field),
        header_cell("Instance"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for row in rows {
        let value = if row.value.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(&row.value)
        };
        let instance = match row.instance {
            Some(instance) => Cell::new(instance),
            None => dim_cell("-"),
        };
        table.add_row(vec![Cell::new(&row.record), value, instance]);
    }
    println!("{table}");
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
