//! Rendering of extracted rows as table, CSV, or JSON.

use std::io::Write;

use anyhow::{Context, Result};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;
use tracing::trace;

use qrda_core::BatchOutput;
use qrda_model::FormattedRow;
use qrda_model::columns::{MEASUREMENT, SOURCE_DOCUMENT};
use qrda_transform::{DISPLAY_COLUMNS, RecordFrame, cell_string};

use crate::logging::redact_option;

/// Row output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Condensed table for terminals.
    #[default]
    Table,
    Csv,
    /// Array of row objects.
    Json,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    source_document: &'a str,
    #[serde(flatten)]
    row: &'a FormattedRow,
}

/// Builds one frame over every successful document in the batch.
pub fn batch_frame(batch: &BatchOutput) -> Result<RecordFrame> {
    RecordFrame::from_outputs(
        batch
            .outputs
            .iter()
            .map(|output| (output.source.as_str(), output.rows.as_slice())),
    )
    .context("build record frame")
}

/// Writes the batch rows to `writer` in `format`.
pub fn write_rows<W: Write>(batch: &BatchOutput, format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => {
            let mut frame = batch_frame(batch)?;
            frame.write_csv(writer).context("write csv")?;
        }
        OutputFormat::Json => {
            let rows: Vec<JsonRow<'_>> = batch
                .outputs
                .iter()
                .flat_map(|output| {
                    output.rows.iter().map(|row| JsonRow {
                        source_document: &output.source,
                        row,
                    })
                })
                .collect();
            serde_json::to_writer_pretty(&mut writer, &rows).context("write json")?;
            writeln!(writer).context("write json")?;
        }
        OutputFormat::Table => {
            let table = rows_table(batch)?;
            writeln!(writer, "{table}").context("write table")?;
        }
    }
    Ok(())
}

/// Emits one trace event per row; patient values are redacted unless
/// row-level logging is enabled.
pub fn log_rows(batch: &BatchOutput) {
    for output in &batch.outputs {
        for row in &output.rows {
            trace!(
                document = %output.source,
                patient_id = redact_option(row.row.patient_id.as_deref()),
                full_name = redact_option(Some(&row.full_name)),
                observation_code = redact_option(row.row.observation_code.as_deref()),
                measurement = redact_option(row.row.measurement.as_deref()),
                "row"
            );
        }
    }
}

/// Condensed display table: source document plus the display columns.
pub fn rows_table(batch: &BatchOutput) -> Result<Table> {
    let frame = batch_frame(batch)?;
    let mut table = Table::new();
    let mut header = vec![header_cell("Document")];
    header.extend(DISPLAY_COLUMNS.iter().map(|name| header_cell(name)));
    table.set_header(header);
    apply_table_style(&mut table);
    if let Some(index) = DISPLAY_COLUMNS.iter().position(|name| *name == MEASUREMENT) {
        align_column(&mut table, index + 1, CellAlignment::Right);
    }

    let display = frame.display().context("select display columns")?;
    for idx in 0..frame.record_count() {
        let mut cells = vec![dim_cell(cell_string(&frame.data, SOURCE_DOCUMENT, idx))];
        for name in DISPLAY_COLUMNS {
            let value = cell_string(&display, name, idx);
            cells.push(if value.trim().is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            });
        }
        table.add_row(cells);
    }
    Ok(table)
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
