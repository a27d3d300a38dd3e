use thiserror::Error;

use crate::enums::DocumentShape;

/// Structural errors that abort processing of a single document.
///
/// Missing leaf values are never errors; they surface as null fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrdaError {
    /// The shape's required anchor is absent from the document.
    #[error("{shape} anchor '{anchor}' is missing from the document")]
    ShapeMismatch {
        shape: DocumentShape,
        anchor: String,
    },

    /// Neither known shape signature was found.
    #[error("document matches no known shape")]
    UnrecognizedShape,

    /// A multi-patient entry carries no patient and the caller asked for
    /// inconsistent entries to be rejected.
    #[error("entry {index} has no patient record in a multi-patient document")]
    InconsistentEntries { index: usize },
}

pub type Result<T> = std::result::Result<T, QrdaError>;
