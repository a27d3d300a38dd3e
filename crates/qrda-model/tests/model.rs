//! Tests for qrda-model types.

use qrda_model::{
    DocumentShape, FlatRow, FormattedRow, ObservationRecord, PatientRecord, QrdaError, columns,
};

fn patient() -> PatientRecord {
    PatientRecord {
        id: Some("P1".to_string()),
        given_name: Some("Jane".to_string()),
        family_name: Some("Doe".to_string()),
        birth_time: Some("19850315".to_string()),
        gender: Some("F".to_string()),
    }
}

#[test]
fn shape_names_round_trip() {
    for shape in [DocumentShape::SinglePatient, DocumentShape::MultiPatient] {
        assert_eq!(shape.as_str().parse::<DocumentShape>(), Ok(shape));
    }
    assert_eq!("MULTI_PATIENT".parse::<DocumentShape>(), Ok(DocumentShape::MultiPatient));
    assert_eq!("single".parse::<DocumentShape>(), Ok(DocumentShape::SinglePatient));
    assert!("both".parse::<DocumentShape>().is_err());
}

#[test]
fn flat_row_without_observation_keeps_patient() {
    let row = FlatRow::from_parts(Some(&patient()), None);

    assert_eq!(row.patient_id.as_deref(), Some("P1"));
    assert_eq!(row.gender.as_deref(), Some("F"));
    assert_eq!(row.observation_code, None);
    assert_eq!(row.measurement, None);
    assert_eq!(row.unit, None);
}

#[test]
fn flat_row_maps_observation_fields() {
    let observation = ObservationRecord {
        code: Some("8480-6".to_string()),
        status_code: Some("completed".to_string()),
        effective_time: Some("20240101".to_string()),
        value: Some("120".to_string()),
        unit: Some("mm[Hg]".to_string()),
    };
    let row = FlatRow::from_parts(None, Some(&observation));

    assert_eq!(row.patient_id, None);
    assert_eq!(
        row.values(),
        [
            None,
            None,
            None,
            None,
            None,
            Some("8480-6"),
            Some("20240101"),
            Some("120"),
            Some("mm[Hg]"),
        ]
    );
}

#[test]
fn same_patient_ignores_observation_columns() {
    let a = FlatRow {
        observation_code: Some("8480-6".to_string()),
        ..FlatRow::from_parts(Some(&patient()), None)
    };
    let b = FlatRow {
        observation_code: Some("8462-4".to_string()),
        ..FlatRow::from_parts(Some(&patient()), None)
    };
    assert!(a.same_patient(&b));
    assert!(!a.same_patient(&FlatRow::default()));
}

#[test]
fn formatted_row_serializes_flat() {
    let row = FormattedRow {
        row: FlatRow::from_parts(Some(&patient()), None),
        full_name: "Jane Doe".to_string(),
        birth_date_formatted: "1985-03-15".to_string(),
    };
    let json = serde_json::to_value(&row).expect("serialize row");
    let object = json.as_object().expect("object");

    assert_eq!(object.len(), columns::FORMATTED_ROW.len());
    for column in columns::FORMATTED_ROW {
        assert!(object.contains_key(column), "missing {column}");
    }
    assert_eq!(object["full_name"], "Jane Doe");
    assert!(object["measurement"].is_null());
}

#[test]
fn error_messages_name_the_anchor() {
    let err = QrdaError::ShapeMismatch {
        shape: DocumentShape::SinglePatient,
        anchor: "recordTarget/patientRole".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "single-patient anchor 'recordTarget/patientRole' is missing from the document"
    );
    assert_eq!(
        QrdaError::InconsistentEntries { index: 2 }.to_string(),
        "entry 2 has no patient record in a multi-patient document"
    );
}
