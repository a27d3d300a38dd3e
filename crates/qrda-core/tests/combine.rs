//! Cardinality laws of the two combination rules.

use proptest::prelude::*;
use qrda_core::{cartesian_combine, positional_combine};
use qrda_model::{EntryRecord, FlatRow, ObservationRecord, PatientRecord};

fn text() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[A-Za-z0-9]{1,8}")
}

fn patient() -> impl Strategy<Value = PatientRecord> {
    (text(), text(), text(), text(), text()).prop_map(
        |(id, given_name, family_name, birth_time, gender)| PatientRecord {
            id,
            given_name,
            family_name,
            birth_time,
            gender,
        },
    )
}

fn observation() -> impl Strategy<Value = ObservationRecord> {
    (text(), text(), text(), text(), text()).prop_map(
        |(code, status_code, effective_time, value, unit)| ObservationRecord {
            code,
            status_code,
            effective_time,
            value,
            unit,
        },
    )
}

fn entry() -> impl Strategy<Value = EntryRecord> {
    (proptest::option::of(patient()), proptest::option::of(observation()))
        .prop_map(|(patient, observation)| EntryRecord {
            patient,
            observation,
        })
}

proptest! {
    #[test]
    fn cartesian_yields_one_row_per_observation(
        patient in patient(),
        observations in proptest::collection::vec(observation(), 0..12),
    ) {
        let rows = cartesian_combine(&patient, &observations);
        prop_assert_eq!(rows.len(), observations.len());

        let expected = FlatRow::from_parts(Some(&patient), None);
        for (row, observation) in rows.iter().zip(&observations) {
            prop_assert!(row.same_patient(&expected));
            prop_assert_eq!(&row.observation_code, &observation.code);
            prop_assert_eq!(&row.measurement, &observation.value);
        }
    }

    #[test]
    fn positional_yields_one_row_per_entry(entries in proptest::collection::vec(entry(), 0..12)) {
        let rows = positional_combine(&entries);
        prop_assert_eq!(rows.len(), entries.len());

        for (row, entry) in rows.iter().zip(&entries) {
            let own = FlatRow::from_parts(entry.patient.as_ref(), entry.observation.as_ref());
            prop_assert_eq!(row, &own);
        }
    }
}
