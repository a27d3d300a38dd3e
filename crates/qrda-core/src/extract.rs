//! Field extraction.
//!
//! Every leaf is a path lookup against a layout. Missing intermediate nodes
//! produce `None` for that field; partial records are normal.

use qrda_model::{
    EntryRecord, FlatRow, Node, ObservationLayout, ObservationRecord, PatientLayout,
    PatientRecord,
};

use crate::combine::{cartesian_combine, positional_combine};

/// Sub-records pulled out of one document, before combination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// One patient shared by every observation in the document.
    SharedPatient {
        patient: PatientRecord,
        observations: Vec<ObservationRecord>,
    },
    /// One patient/observation pair per entry, in entry order.
    PerEntry(Vec<EntryRecord>),
}

impl Extraction {
    /// Combines the extracted sub-records into flat rows.
    pub fn combine(self) -> Vec<FlatRow> {
        match self {
            Extraction::SharedPatient {
                patient,
                observations,
            } => cartesian_combine(&patient, &observations),
            Extraction::PerEntry(entries) => positional_combine(&entries),
        }
    }

    /// Number of observations found.
    pub fn observation_count(&self) -> usize {
        match self {
            Extraction::SharedPatient { observations, .. } => observations.len(),
            Extraction::PerEntry(entries) => entries
                .iter()
                .filter(|entry| entry.observation.is_some())
                .count(),
        }
    }
}

/// Reads patient demographics below a patient-role node.
pub fn extract_patient(node: &Node, layout: &PatientLayout) -> PatientRecord {
    PatientRecord {
        id: leaf(node, layout.id),
        given_name: leaf(node, layout.given_name),
        family_name: leaf(node, layout.family_name),
        birth_time: leaf(node, layout.birth_time),
        gender: leaf(node, layout.gender),
    }
}

/// Reads observation fields below an observation node.
pub fn extract_observation(node: &Node, layout: &ObservationLayout) -> ObservationRecord {
    ObservationRecord {
        code: leaf(node, layout.code),
        status_code: leaf(node, layout.status_code),
        effective_time: leaf(node, layout.effective_time),
        value: leaf(node, layout.value),
        unit: leaf(node, layout.unit),
    }
}

fn leaf(node: &Node, path: qrda_model::FieldPath) -> Option<String> {
    node.text_at(path).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrda_model::layout::{OBSERVATION_FIELDS, PATIENT_ROLE_FIELDS};

    fn attr(name: &str, value: &str) -> Node {
        Node::element([(format!("_{name}"), Node::text(value))])
    }

    #[test]
    fn partial_patient_keeps_present_fields() {
        let node = Node::element([
            ("id", attr("root", "P9")),
            (
                "patient",
                Node::element([("administrativeGenderCode", attr("code", "M"))]),
            ),
        ]);

        let patient = extract_patient(&node, &PATIENT_ROLE_FIELDS);

        assert_eq!(patient.id.as_deref(), Some("P9"));
        assert_eq!(patient.gender.as_deref(), Some("M"));
        assert_eq!(patient.given_name, None);
        assert_eq!(patient.birth_time, None);
    }

    #[test]
    fn observation_value_and_unit_share_an_element() {
        let node = Node::element([
            ("code", attr("code", "8480-6")),
            ("statusCode", attr("code", "completed")),
            (
                "value",
                Node::element([
                    ("_value", Node::text("120")),
                    ("_unit", Node::text("mm[Hg]")),
                ]),
            ),
        ]);

        let observation = extract_observation(&node, &OBSERVATION_FIELDS);

        assert_eq!(observation.code.as_deref(), Some("8480-6"));
        assert_eq!(observation.status_code.as_deref(), Some("completed"));
        assert_eq!(observation.effective_time, None);
        assert_eq!(observation.value.as_deref(), Some("120"));
        assert_eq!(observation.unit.as_deref(), Some("mm[Hg]"));
    }

    #[test]
    fn observation_count_skips_empty_entries() {
        let extraction = Extraction::PerEntry(vec![
            EntryRecord {
                patient: Some(PatientRecord::default()),
                observation: Some(ObservationRecord::default()),
            },
            EntryRecord {
                patient: Some(PatientRecord::default()),
                observation: None,
            },
        ]);
        assert_eq!(extraction.observation_count(), 1);
    }
}
