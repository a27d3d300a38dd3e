//! Derived display fields.
//!
//! Pure row-to-row functions with no knowledge of document structure.

use qrda_model::{FlatRow, FormattedRow};

/// Joins given and family name with a single space.
///
/// Absent parts are skipped along with their separator, so a row with
/// only a given name reads `"Jane"` and a row with neither reads `""`.
pub fn full_name(given: Option<&str>, family: Option<&str>) -> String {
    [given, family]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reformats a fixed-width `YYYYMMDD` token as `YYYY-MM-DD`.
///
/// Characters 1-4, 5-6 and 7-8 are sliced by position and joined with `-`.
/// This is not a date parse: short or non-numeric input yields empty or
/// partial segments, and anything after the eighth character is dropped.
/// An absent token formats as the empty string.
///
/// # Examples
///
/// ```
/// use qrda_transform::format::birth_date_formatted;
///
/// assert_eq!(birth_date_formatted(Some("19850315")), "1985-03-15");
/// assert_eq!(birth_date_formatted(Some("198503")), "1985-03-");
/// assert_eq!(birth_date_formatted(None), "");
/// ```
pub fn birth_date_formatted(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => [substring(raw, 0, 4), substring(raw, 4, 2), substring(raw, 6, 2)].join("-"),
        None => String::new(),
    }
}

/// Character-based slice that returns an empty string past the end.
fn substring(value: &str, start: usize, len: usize) -> String {
    value.chars().skip(start).take(len).collect()
}

/// Adds the derived fields to one row.
pub fn format_row(row: &FlatRow) -> FormattedRow {
    FormattedRow {
        full_name: full_name(row.first_name.as_deref(), row.last_name.as_deref()),
        birth_date_formatted: birth_date_formatted(row.birth_date.as_deref()),
        row: row.clone(),
    }
}

/// Adds the derived fields to every row, preserving order.
pub fn format_rows(rows: &[FlatRow]) -> Vec<FormattedRow> {
    rows.iter().map(format_row).collect()
}
