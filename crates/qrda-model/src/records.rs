//! Extracted and flattened record types.
//!
//! Every leaf is optional: real documents are sparse, and absence is carried
//! through as `None` rather than reported as an error.

use serde::{Deserialize, Serialize};

/// Output column names, in output order.
pub mod columns {
    pub const PATIENT_ID: &str = "patient_id";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const BIRTH_DATE: &str = "birth_date";
    pub const GENDER: &str = "gender";
    pub const OBSERVATION_CODE: &str = "observation_code";
    pub const OBSERVATION_DATE: &str = "observation_date";
    pub const MEASUREMENT: &str = "measurement";
    pub const UNIT: &str = "unit";
    pub const FULL_NAME: &str = "full_name";
    pub const BIRTH_DATE_FORMATTED: &str = "birth_date_formatted";
    /// Prepended when rows from several documents share one table.
    pub const SOURCE_DOCUMENT: &str = "source_document";

    /// Columns of a [`FlatRow`](super::FlatRow).
    pub const FLAT_ROW: [&str; 9] = [
        PATIENT_ID,
        FIRST_NAME,
        LAST_NAME,
        BIRTH_DATE,
        GENDER,
        OBSERVATION_CODE,
        OBSERVATION_DATE,
        MEASUREMENT,
        UNIT,
    ];

    /// Columns of a [`FormattedRow`](super::FormattedRow).
    pub const FORMATTED_ROW: [&str; 11] = [
        PATIENT_ID,
        FIRST_NAME,
        LAST_NAME,
        BIRTH_DATE,
        GENDER,
        OBSERVATION_CODE,
        OBSERVATION_DATE,
        MEASUREMENT,
        UNIT,
        FULL_NAME,
        BIRTH_DATE_FORMATTED,
    ];
}

/// Patient demographics from one patient-role node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    /// Raw fixed-width birth time (`YYYYMMDD...`).
    pub birth_time: Option<String>,
    pub gender: Option<String>,
}

/// One clinical observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub code: Option<String>,
    pub status_code: Option<String>,
    /// Raw effective time as written in the document.
    pub effective_time: Option<String>,
    pub value: Option<String>,
    pub unit: Option<String>,
}

/// Sub-records found in one entry of a multi-patient document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub patient: Option<PatientRecord>,
    pub observation: Option<ObservationRecord>,
}

/// One patient joined with one observation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    pub patient_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub gender: Option<String>,
    pub observation_code: Option<String>,
    pub observation_date: Option<String>,
    pub measurement: Option<String>,
    pub unit: Option<String>,
}

impl FlatRow {
    /// Projects a patient and an observation into one row.
    ///
    /// Either side may be absent; its columns are then left null.
    pub fn from_parts(
        patient: Option<&PatientRecord>,
        observation: Option<&ObservationRecord>,
    ) -> Self {
        let patient = patient.cloned().unwrap_or_default();
        let observation = observation.cloned().unwrap_or_default();
        Self {
            patient_id: patient.id,
            first_name: patient.given_name,
            last_name: patient.family_name,
            birth_date: patient.birth_time,
            gender: patient.gender,
            observation_code: observation.code,
            observation_date: observation.effective_time,
            measurement: observation.value,
            unit: observation.unit,
        }
    }

    /// Column values in [`columns::FLAT_ROW`] order.
    pub fn values(&self) -> [Option<&str>; 9] {
        [
            self.patient_id.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.birth_date.as_deref(),
            self.gender.as_deref(),
            self.observation_code.as_deref(),
            self.observation_date.as_deref(),
            self.measurement.as_deref(),
            self.unit.as_deref(),
        ]
    }

    /// Returns true when the patient-side columns match `other`'s.
    pub fn same_patient(&self, other: &FlatRow) -> bool {
        self.patient_id == other.patient_id
            && self.first_name == other.first_name
            && self.last_name == other.last_name
            && self.birth_date == other.birth_date
            && self.gender == other.gender
    }
}

/// A flat row with its derived display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedRow {
    #[serde(flatten)]
    pub row: FlatRow,
    pub full_name: String,
    pub birth_date_formatted: String,
}

impl FormattedRow {
    /// Column values in [`columns::FORMATTED_ROW`] order.
    pub fn values(&self) -> [Option<&str>; 11] {
        let [id, first, last, birth, gender, code, date, measurement, unit] = self.row.values();
        [
            id,
            first,
            last,
            birth,
            gender,
            code,
            date,
            measurement,
            unit,
            Some(self.full_name.as_str()),
            Some(self.birth_date_formatted.as_str()),
        ]
    }
}
