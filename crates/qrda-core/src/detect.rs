//! Shape detection.
//!
//! Detection inspects only the first entry of the document and the
//! `recordTarget` area; a document that mixes entry kinds is classified by
//! its first entry.

use tracing::debug;

use qrda_model::{Detection, Node};

use crate::shape::{ShapeRegistry, default_registry};

/// Classifies a document against the default shapes.
pub fn detect_shape(root: &Node) -> Detection {
    detect_shape_with(default_registry(), root)
}

/// Classifies a document against the shapes in `registry`.
pub fn detect_shape_with(registry: &ShapeRegistry, root: &Node) -> Detection {
    let detection = registry.detect(root);
    debug!(%detection, "detected document shape");
    detection
}
