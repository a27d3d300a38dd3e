//! Core extraction logic for QRDA-style clinical documents.
//!
//! - **shape**: shape descriptors and the detection registry
//! - **detect**: document shape classification
//! - **extract**: path-driven patient and observation extraction
//! - **combine**: cartesian and positional row combination
//! - **pipeline**: per-document and batch processing

pub mod combine;
pub mod detect;
pub mod extract;
pub mod pipeline;
pub mod shape;

pub use combine::{cartesian_combine, positional_combine};
pub use detect::{detect_shape, detect_shape_with};
pub use extract::{Extraction, extract_observation, extract_patient};
pub use pipeline::{
    BatchOutput, DocumentFailure, DocumentOutput, extract_rows, process_document,
    process_documents,
};
pub use shape::{ShapeDescriptor, ShapeRegistry, build_default_registry, default_registry};
