//! Multi-patient shape: every entry embeds its own patient and observation.

use tracing::{debug, warn};

use qrda_model::{
    EntryConsistency, EntryRecord, ExtractOptions, MULTI_PATIENT, Node, QrdaError, Result,
    ShapeLayout,
};

use super::{ShapeDescriptor, entry_list};
use crate::extract::{Extraction, extract_observation, extract_patient};

pub struct MultiPatientShape;

impl ShapeDescriptor for MultiPatientShape {
    fn layout(&self) -> &'static ShapeLayout {
        &MULTI_PATIENT
    }

    fn description(&self) -> &'static str {
        "One patient with one observation per entry"
    }

    /// Only the first entry is sampled; shape is assumed uniform.
    fn applies_to(&self, root: &Node) -> bool {
        root.at(MULTI_PATIENT.entries)
            .and_then(|entries| entries.items().first())
            .and_then(|entry| entry.at(MULTI_PATIENT.patient.path()))
            .is_some()
    }

    fn extract(&self, root: &Node, options: &ExtractOptions) -> Result<Extraction> {
        let layout = self.layout();
        let entries =
            entry_list(root, layout.entries).ok_or_else(|| QrdaError::ShapeMismatch {
                shape: layout.shape,
                anchor: layout.entries.to_string(),
            })?;

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let patient_node = entry.at(layout.patient.path());
            if patient_node.is_none() {
                match options.entry_consistency {
                    EntryConsistency::Reject => {
                        return Err(QrdaError::InconsistentEntries { index });
                    }
                    EntryConsistency::Tolerate => {
                        warn!(index, "entry has no patient record, keeping a null-patient row");
                    }
                }
            }
            let observation = patient_node
                .and_then(|node| node.at(layout.observation.path()))
                .map(|node| extract_observation(node, &layout.observation_fields));
            records.push(EntryRecord {
                patient: patient_node.map(|node| extract_patient(node, &layout.patient_fields)),
                observation,
            });
        }

        debug!(entry_count = records.len(), "extracted multi-patient document");
        Ok(Extraction::PerEntry(records))
    }
}
