//! Per-document and batch processing.
//!
//! A document runs detection → extraction → combination → formatting.
//! Structural errors abort only the offending document; a batch always
//! processes every document it is given.

use std::time::Instant;

use thiserror::Error;
use tracing::{debug, info, info_span, warn};

use qrda_model::{
    Detection, Document, DocumentShape, ExtractOptions, FlatRow, FormattedRow, QrdaError, Result,
    ShapeSelection,
};
use qrda_transform::format_rows;

use crate::detect::detect_shape_with;
use crate::shape::{ShapeDescriptor, ShapeRegistry};

/// Rows produced from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentOutput {
    /// Identity of the source document.
    pub source: String,
    pub shape: DocumentShape,
    pub rows: Vec<FormattedRow>,
}

/// A document that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{document}: {error}")]
pub struct DocumentFailure {
    /// Identity of the source document.
    pub document: String,
    #[source]
    pub error: QrdaError,
}

/// Outcome of processing many documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutput {
    pub outputs: Vec<DocumentOutput>,
    pub failures: Vec<DocumentFailure>,
}

impl BatchOutput {
    /// Total rows across successful documents.
    pub fn row_count(&self) -> usize {
        self.outputs.iter().map(|output| output.rows.len()).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Detects (or takes the forced) shape and returns the combined rows.
///
/// # Errors
///
/// - [`QrdaError::UnrecognizedShape`] when detection finds no known shape, or
///   a forced shape is not registered
/// - [`QrdaError::ShapeMismatch`] when the shape's anchor is absent
/// - [`QrdaError::InconsistentEntries`] when rejecting mixed entries
pub fn extract_rows(
    document: &Document,
    registry: &ShapeRegistry,
    options: &ExtractOptions,
) -> Result<(DocumentShape, Vec<FlatRow>)> {
    let descriptor = select_descriptor(document, registry, options)?;
    let extraction = descriptor.extract(&document.root, options)?;
    debug!(
        shape = %descriptor.shape(),
        observation_count = extraction.observation_count(),
        "extraction complete"
    );
    let rows = descriptor.combine(extraction);
    Ok((descriptor.shape(), rows))
}

fn select_descriptor<'r>(
    document: &Document,
    registry: &'r ShapeRegistry,
    options: &ExtractOptions,
) -> Result<&'r dyn ShapeDescriptor> {
    match options.shape {
        ShapeSelection::Force(shape) => {
            debug!(%shape, "using forced document shape");
            registry.get(shape).ok_or(QrdaError::UnrecognizedShape)
        }
        ShapeSelection::Auto => match detect_shape_with(registry, &document.root) {
            Detection::Recognized(shape) => registry.get(shape).ok_or(QrdaError::UnrecognizedShape),
            Detection::Unrecognized => Err(QrdaError::UnrecognizedShape),
        },
    }
}

/// Processes one document into formatted rows.
pub fn process_document(
    document: &Document,
    registry: &ShapeRegistry,
    options: &ExtractOptions,
) -> std::result::Result<DocumentOutput, DocumentFailure> {
    let span = info_span!("document", source = %document.source);
    let _guard = span.enter();
    let start = Instant::now();

    match extract_rows(document, registry, options) {
        Ok((shape, rows)) => {
            let rows = format_rows(&rows);
            info!(
                %shape,
                row_count = rows.len(),
                duration_ms = start.elapsed().as_millis(),
                "document processed"
            );
            Ok(DocumentOutput {
                source: document.source.clone(),
                shape,
                rows,
            })
        }
        Err(error) => {
            warn!(%error, "document skipped");
            Err(DocumentFailure {
                document: document.source.clone(),
                error,
            })
        }
    }
}

/// Processes every document, collecting failures instead of stopping.
///
/// Documents are independent; output order follows input order.
pub fn process_documents<'a, I>(
    documents: I,
    registry: &ShapeRegistry,
    options: &ExtractOptions,
) -> BatchOutput
where
    I: IntoIterator<Item = &'a Document>,
{
    let mut batch = BatchOutput::default();
    for document in documents {
        match process_document(document, registry, options) {
            Ok(output) => batch.outputs.push(output),
            Err(failure) => batch.failures.push(failure),
        }
    }
    info!(
        document_count = batch.outputs.len() + batch.failures.len(),
        failed = batch.failures.len(),
        row_count = batch.row_count(),
        "batch complete"
    );
    batch
}
