//! Configuration options for document extraction.

use serde::{Deserialize, Serialize};

use crate::enums::DocumentShape;

/// How the shape of a document is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeSelection {
    /// Inspect the document and pick the matching shape.
    #[default]
    Auto,
    /// Skip detection and process every document as this shape.
    Force(DocumentShape),
}

/// Policy for multi-patient entries that carry no patient record.
///
/// Detection samples only the first entry, so a document may mix entry
/// kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EntryConsistency {
    /// Keep the entry as a row with null patient fields.
    #[default]
    Tolerate,
    /// Fail the document.
    Reject,
}

/// Options controlling extraction of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractOptions {
    pub shape: ShapeSelection,
    pub entry_consistency: EntryConsistency,
}

impl ExtractOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shape(mut self, shape: ShapeSelection) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_entry_consistency(mut self, policy: EntryConsistency) -> Self {
        self.entry_consistency = policy;
        self
    }
}
