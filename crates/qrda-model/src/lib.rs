//! Data model for QRDA-style clinical document extraction.
//!
//! - **tree**: generic decoded document tree and path lookup
//! - **layout**: declarative descriptions of the known document shapes
//! - **records**: patient, observation, and flattened output rows
//! - **options**: extraction configuration

pub mod enums;
pub mod error;
pub mod layout;
pub mod options;
pub mod records;
pub mod tree;

pub use enums::{Detection, DocumentShape};
pub use error::{QrdaError, Result};
pub use layout::{
    Anchor, MULTI_PATIENT, ObservationLayout, PatientLayout, SINGLE_PATIENT, ShapeLayout,
};
pub use options::{EntryConsistency, ExtractOptions, ShapeSelection};
pub use records::{
    EntryRecord, FlatRow, FormattedRow, ObservationRecord, PatientRecord, columns,
};
pub use tree::{Document, FieldPath, Node};
