//! Derived-field formatting and tabular output for flattened QRDA rows.
//!
//! - [`format`]: `full_name` and `birth_date_formatted` derivation
//! - [`frame`]: [`RecordFrame`], a polars frame of formatted rows

pub mod format;
pub mod frame;

pub use format::{birth_date_formatted, format_row, format_rows, full_name};
pub use frame::{DISPLAY_COLUMNS, RecordFrame, cell_string};
