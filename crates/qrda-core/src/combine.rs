//! Row combination.
//!
//! The two rules are kept as separate named operations so the 1 x N
//! expansion of single-patient documents reads as intended behavior.

use qrda_model::{EntryRecord, FlatRow, ObservationRecord, PatientRecord};

/// Pairs one patient with every observation (1 x N -> N rows).
///
/// Observation order is preserved and nothing is deduplicated: a repeated
/// observation yields a repeated row. No observations yields no rows.
pub fn cartesian_combine(patient: &PatientRecord, observations: &[ObservationRecord]) -> Vec<FlatRow> {
    observations
        .iter()
        .map(|observation| FlatRow::from_parts(Some(patient), Some(observation)))
        .collect()
}

/// Projects each entry's own patient and observation into one row.
///
/// Entries are never combined with each other; an entry missing either
/// sub-record still yields a row with that side left null.
pub fn positional_combine(entries: &[EntryRecord]) -> Vec<FlatRow> {
    entries
        .iter()
        .map(|entry| FlatRow::from_parts(entry.patient.as_ref(), entry.observation.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(code: &str) -> ObservationRecord {
        ObservationRecord {
            code: Some(code.to_string()),
            ..ObservationRecord::default()
        }
    }

    #[test]
    fn cartesian_keeps_duplicates_in_order() {
        let patient = PatientRecord {
            id: Some("P1".to_string()),
            ..PatientRecord::default()
        };
        let rows = cartesian_combine(
            &patient,
            &[observation("A"), observation("B"), observation("A")],
        );

        let codes: Vec<_> = rows.iter().map(|r| r.observation_code.as_deref()).collect();
        assert_eq!(codes, vec![Some("A"), Some("B"), Some("A")]);
        assert!(rows.iter().all(|r| r.patient_id.as_deref() == Some("P1")));
    }

    #[test]
    fn cartesian_without_observations_is_empty() {
        assert!(cartesian_combine(&PatientRecord::default(), &[]).is_empty());
    }

    #[test]
    fn positional_keeps_entries_without_sub_records() {
        let rows = positional_combine(&[
            EntryRecord {
                patient: Some(PatientRecord {
                    id: Some("P1".to_string()),
                    ..PatientRecord::default()
                }),
                observation: None,
            },
            EntryRecord::default(),
        ]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].patient_id.as_deref(), Some("P1"));
        assert_eq!(rows[0].observation_code, None);
        assert_eq!(rows[1], FlatRow::default());
    }
}
