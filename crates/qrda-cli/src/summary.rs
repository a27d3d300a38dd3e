use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};

use qrda_cli::output::{align_column, apply_table_style, dim_cell, header_cell};

use crate::types::ExtractResult;

/// Prints per-document counts and failures to stderr.
///
/// Rows go to stdout (or the output file), so the summary never mixes
/// into piped CSV or JSON.
pub fn print_summary(result: &ExtractResult) {
    eprintln!(
        "Files: {}  Documents: {}  Rows: {}",
        result.file_count,
        result.document_count,
        result.batch.row_count()
    );
    if let Some(path) = &result.output {
        eprintln!("Output: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Document"),
        header_cell("Shape"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for output in &result.batch.outputs {
        table.add_row(vec![
            Cell::new(&output.source),
            Cell::new(output.shape),
            row_count_cell(output.rows.len()),
        ]);
    }
    for failure in &result.batch.failures {
        table.add_row(vec![
            Cell::new(&failure.document),
            Cell::new("failed").fg(Color::Red).add_attribute(Attribute::Bold),
            dim_cell("-"),
        ]);
    }
    if !result.batch.outputs.is_empty() || result.batch.has_failures() {
        eprintln!("{table}");
    }

    if result.has_errors() {
        eprintln!("Errors:");
        for error in &result.ingest_errors {
            eprintln!("- {error}");
        }
        for failure in &result.batch.failures {
            eprintln!("- {failure}");
        }
    }
}

fn row_count_cell(count: usize) -> Cell {
    if count == 0 {
        dim_cell(count)
    } else {
        Cell::new(count)
    }
}
