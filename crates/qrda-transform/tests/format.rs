//! Tests for derived display fields.

use proptest::prelude::*;
use qrda_model::FlatRow;
use qrda_transform::{birth_date_formatted, format_row, format_rows, full_name};

fn jane(measurement: &str) -> FlatRow {
    FlatRow {
        patient_id: Some("P1".to_string()),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        birth_date: Some("19850315".to_string()),
        gender: Some("F".to_string()),
        measurement: Some(measurement.to_string()),
        unit: Some("mm[Hg]".to_string()),
        ..FlatRow::default()
    }
}

#[test]
fn format_row_adds_derived_fields() {
    let formatted = format_row(&jane("120"));
    assert_eq!(formatted.full_name, "Jane Doe");
    assert_eq!(formatted.birth_date_formatted, "1985-03-15");
    assert_eq!(formatted.row, jane("120"));
}

#[test]
fn missing_demographics_format_as_empty_strings() {
    let formatted = format_row(&FlatRow::default());
    assert_eq!(formatted.full_name, "");
    assert_eq!(formatted.birth_date_formatted, "");
}

#[test]
fn partial_names_have_no_stray_spaces() {
    let given_only = FlatRow {
        first_name: Some("Jane".to_string()),
        ..FlatRow::default()
    };
    let family_only = FlatRow {
        last_name: Some("Doe".to_string()),
        ..FlatRow::default()
    };
    assert_eq!(format_row(&given_only).full_name, "Jane");
    assert_eq!(format_row(&family_only).full_name, "Doe");
}

#[test]
fn format_rows_preserves_order() {
    let rows = format_rows(&[jane("120"), jane("80")]);
    let measurements: Vec<_> = rows.iter().map(|r| r.row.measurement.as_deref()).collect();
    assert_eq!(measurements, vec![Some("120"), Some("80")]);
}

proptest! {
    #[test]
    fn full_name_is_given_space_family(given in "[A-Za-z]{0,12}", family in "[A-Za-z]{0,12}") {
        let name = full_name(Some(&given), Some(&family));
        prop_assert_eq!(&name, &full_name(Some(&given), Some(&family)));
        prop_assert_eq!(name.len(), given.len() + family.len() + 1);
        prop_assert!(name.starts_with(&given));
        prop_assert!(name.ends_with(&family));
    }

    #[test]
    fn birth_date_uses_first_eight_characters(raw in "\\PC{0,20}") {
        let formatted = birth_date_formatted(Some(&raw));
        let prefix: String = raw.chars().take(8).collect();
        prop_assert_eq!(formatted.replace('-', ""), prefix.replace('-', ""));
        prop_assert_eq!(formatted.matches('-').count(), 2 + prefix.matches('-').count());
    }

    #[test]
    fn eight_digit_dates_are_dashed(year in 1900u32..2100, month in 1u32..=12, day in 1u32..=28) {
        let raw = format!("{year:04}{month:02}{day:02}");
        prop_assert_eq!(
            birth_date_formatted(Some(&raw)),
            format!("{year:04}-{month:02}-{day:02}")
        );
    }
}
