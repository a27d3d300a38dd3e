//! Declarative shape layouts.
//!
//! Each known document shape is described purely as data: where the entry
//! list lives, where the patient and observation sub-records attach, and the
//! path to every leaf field below them. Detection and extraction read these
//! layouts; adding a shape means adding a layout, not new branches.

use crate::enums::DocumentShape;
use crate::tree::FieldPath;

/// Path from the document root to the repeated entry list.
pub const ENTRY_LIST: FieldPath = FieldPath::new(&[
    "component",
    "structuredBody",
    "component",
    "section",
    "entry",
]);

/// Leaf paths relative to a patient-role node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientLayout {
    pub id: FieldPath,
    pub given_name: FieldPath,
    pub family_name: FieldPath,
    pub birth_time: FieldPath,
    pub gender: FieldPath,
}

/// Leaf paths relative to an observation node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservationLayout {
    pub code: FieldPath,
    pub status_code: FieldPath,
    pub effective_time: FieldPath,
    pub value: FieldPath,
    pub unit: FieldPath,
}

/// Patient-role fields shared by both known shapes.
pub const PATIENT_ROLE_FIELDS: PatientLayout = PatientLayout {
    id: FieldPath::new(&["id", "_root"]),
    given_name: FieldPath::new(&["patient", "name", "given"]),
    family_name: FieldPath::new(&["patient", "name", "family"]),
    birth_time: FieldPath::new(&["patient", "birthTime", "_value"]),
    gender: FieldPath::new(&["patient", "administrativeGenderCode", "_code"]),
};

/// Observation fields shared by both known shapes.
pub const OBSERVATION_FIELDS: ObservationLayout = ObservationLayout {
    code: FieldPath::new(&["code", "_code"]),
    status_code: FieldPath::new(&["statusCode", "_code"]),
    effective_time: FieldPath::new(&["effectiveTime", "_value"]),
    value: FieldPath::new(&["value", "_value"]),
    unit: FieldPath::new(&["value", "_unit"]),
};

/// Where a sub-record attaches within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Relative to the document root.
    Document(FieldPath),
    /// Relative to each entry of the entry list.
    Entry(FieldPath),
    /// Relative to the patient-role node the sub-record belongs to.
    Patient(FieldPath),
}

impl Anchor {
    pub fn path(&self) -> FieldPath {
        match self {
            Anchor::Document(path) | Anchor::Entry(path) | Anchor::Patient(path) => *path,
        }
    }

    /// Short label naming what the path is relative to.
    pub fn scope(&self) -> &'static str {
        match self {
            Anchor::Document(_) => "document",
            Anchor::Entry(_) => "entry",
            Anchor::Patient(_) => "patient",
        }
    }
}

/// Complete structural description of one document shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeLayout {
    pub shape: DocumentShape,
    pub entries: FieldPath,
    pub patient: Anchor,
    pub observation: Anchor,
    pub patient_fields: PatientLayout,
    pub observation_fields: ObservationLayout,
}

/// One patient in `recordTarget`, many observation entries.
pub const SINGLE_PATIENT: ShapeLayout = ShapeLayout {
    shape: DocumentShape::SinglePatient,
    entries: ENTRY_LIST,
    patient: Anchor::Document(FieldPath::new(&["recordTarget", "patientRole"])),
    observation: Anchor::Entry(FieldPath::new(&["observation"])),
    patient_fields: PATIENT_ROLE_FIELDS,
    observation_fields: OBSERVATION_FIELDS,
};

/// Each entry carries its own patient with one nested observation.
pub const MULTI_PATIENT: ShapeLayout = ShapeLayout {
    shape: DocumentShape::MultiPatient,
    entries: ENTRY_LIST,
    patient: Anchor::Entry(FieldPath::new(&["patientRole"])),
    observation: Anchor::Patient(FieldPath::new(&["patient", "observation"])),
    patient_fields: PATIENT_ROLE_FIELDS,
    observation_fields: OBSERVATION_FIELDS,
};
