use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use catalog_cli::pipeline::ImportReport;
use catalog_cli::state::RunState;
use catalog_model::ColumnKind;

/// Coercion warnings listed individually before the rest are counted.
const MAX_LISTED_WARNINGS: usize = 20;

pub fn print_summary(report: &ImportReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Import"), header_cell("Value")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![label_cell("Mode"), Cell::new(report.mode)]);
    table.add_row(vec![
        label_cell("Input"),
        Cell::new(report.input_path.display()),
    ]);
    table.add_row(vec![label_cell("Rows read"), Cell::new(report.rows_read)]);
    table.add_row(vec![
        label_cell("Rows written"),
        Cell::new(report.rows_written).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![label_cell("Batches"), Cell::new(report.batches)]);
    table.add_row(vec![
        label_cell("Coercion warnings"),
        count_cell(report.warnings.len(), Color::Yellow),
    ]);
    table.add_row(vec![
        label_cell("Output"),
        match &report.output_path {
            Some(path) => Cell::new(path.display()),
            None => dim_cell("-"),
        },
    ]);
    table.add_row(vec![label_cell("Final state"), state_cell(report.final_state)]);
    println!("{table}");
    print_warning_table(report);
}

fn print_warning_table(report: &ImportReport) {
    if report.warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("Field"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for warning in report.warnings.iter().take(MAX_LISTED_WARNINGS) {
        table.add_row(vec![
            Cell::new(warning.line),
            Cell::new(warning.field),
            Cell::new(format!("{:?}", warning.value)).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Values stored as NULL:");
    println!("{table}");
    let hidden = report.warnings.len().saturating_sub(MAX_LISTED_WARNINGS);
    if hidden > 0 {
        println!("... and {hidden} more");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// Postgres type a column is written as.
pub fn kind_label(kind: ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Uuid => "uuid",
        ColumnKind::Text => "text",
        ColumnKind::Float => "float8",
        ColumnKind::Integer => "int8",
        ColumnKind::Boolean => "boolean",
        ColumnKind::Json => "json",
        ColumnKind::Timestamp => "timestamptz",
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn state_cell(state: RunState) -> Cell {
    match state {
        RunState::Done => Cell::new(state).fg(Color::Green).add_attribute(Attribute::Bold),
        RunState::Failed => Cell::new(state).fg(Color::Red).add_attribute(Attribute::Bold),
        _ => Cell::new(state),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_model::TargetField;

    #[test]
    fn every_mapped_field_has_a_type_label() {
        for field in TargetField::ALL {
            assert!(!kind_label(field.column().kind()).is_empty());
        }
        assert_eq!(kind_label(TargetField::Listed.column().kind()), "boolean");
    }
}
