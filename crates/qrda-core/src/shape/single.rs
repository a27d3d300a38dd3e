//! Single-patient shape: one `recordTarget` patient, one observation per entry.

use tracing::debug;

use qrda_model::{ExtractOptions, Node, QrdaError, Result, SINGLE_PATIENT, ShapeLayout};

use super::{ShapeDescriptor, entry_list};
use crate::extract::{Extraction, extract_observation, extract_patient};

pub struct SinglePatientShape;

impl ShapeDescriptor for SinglePatientShape {
    fn layout(&self) -> &'static ShapeLayout {
        &SINGLE_PATIENT
    }

    fn description(&self) -> &'static str {
        "One patient under recordTarget, one observation per entry"
    }

    fn applies_to(&self, root: &Node) -> bool {
        root.at(SINGLE_PATIENT.patient.path()).is_some()
    }

    fn extract(&self, root: &Node, _options: &ExtractOptions) -> Result<Extraction> {
        let layout = self.layout();
        let patient_path = layout.patient.path();
        let patient_node = root.at(patient_path).ok_or_else(|| QrdaError::ShapeMismatch {
            shape: layout.shape,
            anchor: patient_path.to_string(),
        })?;
        let patient = extract_patient(patient_node, &layout.patient_fields);

        // Entries without an observation contribute nothing.
        let entries = entry_list(root, layout.entries).unwrap_or_default();
        let observations: Vec<_> = entries
            .iter()
            .filter_map(|entry| entry.at(layout.observation.path()))
            .map(|node| extract_observation(node, &layout.observation_fields))
            .collect();

        debug!(
            entry_count = entries.len(),
            observation_count = observations.len(),
            "extracted single-patient document"
        );
        Ok(Extraction::SharedPatient {
            patient,
            observations,
        })
    }
}
