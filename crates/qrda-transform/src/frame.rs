//! Tabular output of formatted rows.

use std::io::Write;

use polars::prelude::{
    AnyValue, Column, CsvWriter, DataFrame, IntoColumn, NamedFrom, PolarsResult, SerWriter, Series,
};
use tracing::debug;

use qrda_model::FormattedRow;
use qrda_model::columns::{
    BIRTH_DATE_FORMATTED, FORMATTED_ROW, FULL_NAME, GENDER, MEASUREMENT, SOURCE_DOCUMENT, UNIT,
};

/// Columns shown in the condensed display view.
pub const DISPLAY_COLUMNS: [&str; 5] = [FULL_NAME, GENDER, BIRTH_DATE_FORMATTED, MEASUREMENT, UNIT];

/// Formatted rows as a string-typed frame.
///
/// Every column is nullable text; absent values stay null.
#[derive(Debug, Clone)]
pub struct RecordFrame {
    pub data: DataFrame,
}

impl RecordFrame {
    /// Builds a frame with the formatted-row columns in output order.
    pub fn from_rows(rows: &[FormattedRow]) -> PolarsResult<Self> {
        let data = DataFrame::new(row_columns(rows))?;
        Ok(Self { data })
    }

    /// Builds one frame from several documents, prefixed by a
    /// `source_document` column naming the origin of each row.
    pub fn from_outputs<'a, I>(outputs: I) -> PolarsResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a [FormattedRow])>,
    {
        let mut sources: Vec<&str> = Vec::new();
        let mut rows: Vec<FormattedRow> = Vec::new();
        for (source, document_rows) in outputs {
            sources.extend(std::iter::repeat_n(source, document_rows.len()));
            rows.extend_from_slice(document_rows);
        }
        let mut frame = Self::from_rows(&rows)?;
        frame
            .data
            .insert_column(0, Series::new(SOURCE_DOCUMENT.into(), sources))?;
        debug!(row_count = frame.record_count(), "built record frame");
        Ok(frame)
    }

    /// Number of rows in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Returns the condensed view: name, gender, birth date and measurement.
    pub fn display(&self) -> PolarsResult<DataFrame> {
        self.data.select(DISPLAY_COLUMNS)
    }

    /// Writes the frame as CSV with a header row; nulls become empty cells.
    pub fn write_csv<W: Write>(&mut self, writer: W) -> PolarsResult<()> {
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut self.data)
    }
}

fn row_columns(rows: &[FormattedRow]) -> Vec<Column> {
    FORMATTED_ROW
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let values: Vec<Option<&str>> = rows.iter().map(|row| row.values()[index]).collect();
            Series::new((*name).into(), values).into_column()
        })
        .collect()
}

/// Reads one cell as display text; nulls and missing columns read as empty.
pub fn cell_string(df: &DataFrame, column: &str, idx: usize) -> String {
    match df.column(column).and_then(|col| col.get(idx)) {
        Ok(AnyValue::String(value)) => value.to_string(),
        Ok(AnyValue::StringOwned(value)) => value.to_string(),
        Ok(AnyValue::Null) | Err(_) => String::new(),
        Ok(other) => other.to_string(),
    }
}
