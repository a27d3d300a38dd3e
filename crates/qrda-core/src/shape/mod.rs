//! Shape descriptors and registry.
//!
//! Each known document shape implements [`ShapeDescriptor`] on top of its
//! [`ShapeLayout`]. Descriptors are registered in a [`ShapeRegistry`], which
//! tries them in priority order during detection.
//!
//! # Usage
//!
//! ```ignore
//! use qrda_core::shape::default_registry;
//!
//! let registry = default_registry();
//! if let Some(descriptor) = registry.find(&document.root) {
//!     let extraction = descriptor.extract(&document.root, &options)?;
//!     let rows = descriptor.combine(extraction);
//! }
//! ```
//!
//! # Registered Shapes
//!
//! | Shape | Patient anchor | Observation anchor |
//! |-------|----------------|--------------------|
//! | multi-patient | entry `patientRole` | patient `patient/observation` |
//! | single-patient | document `recordTarget/patientRole` | entry `observation` |

mod multi;
mod single;

pub use multi::MultiPatientShape;
pub use single::SinglePatientShape;

use std::sync::OnceLock;

use tracing::warn;

use qrda_model::{
    Detection, DocumentShape, ExtractOptions, FieldPath, FlatRow, Node, Result, ShapeLayout,
};

use crate::extract::Extraction;

/// Capability implemented once per known document shape.
///
/// # Implementing a Shape
///
/// 1. Describe the shape as a [`ShapeLayout`].
/// 2. Implement this trait for a unit struct returning that layout.
/// 3. Register the descriptor in [`ShapeRegistry`].
///
/// Detection and pipeline call sites need no changes.
pub trait ShapeDescriptor: Send + Sync {
    /// The declarative layout this descriptor walks.
    fn layout(&self) -> &'static ShapeLayout;

    /// The shape this descriptor handles.
    fn shape(&self) -> DocumentShape {
        self.layout().shape
    }

    /// Returns a human-readable description of the shape.
    fn description(&self) -> &'static str {
        "Document shape"
    }

    /// Returns true when the document carries this shape's signature.
    fn applies_to(&self, root: &Node) -> bool;

    /// Pulls patient and observation sub-records out of the document.
    ///
    /// # Errors
    ///
    /// Returns [`QrdaError::ShapeMismatch`](qrda_model::QrdaError::ShapeMismatch)
    /// when the shape's required anchor is absent.
    fn extract(&self, root: &Node, options: &ExtractOptions) -> Result<Extraction>;

    /// Combines extracted sub-records into flat rows.
    fn combine(&self, extraction: Extraction) -> Vec<FlatRow> {
        extraction.combine()
    }
}

/// Resolves the entry list below `root`.
///
/// Only the first of repeated elements along the path is read; each
/// collapsed list is logged so skipped sections stay visible.
fn entry_list(root: &Node, path: FieldPath) -> Option<&[Node]> {
    for (field, count) in root.collapsed_lists(path) {
        warn!(
            field,
            count,
            skipped = count - 1,
            "repeated elements on the entry path, reading the first only"
        );
    }
    root.at(path).map(Node::items)
}

/// Registry of shape descriptors in detection priority order.
#[derive(Default)]
pub struct ShapeRegistry {
    descriptors: Vec<Box<dyn ShapeDescriptor>>,
}

impl ShapeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor.
    ///
    /// A descriptor for an already registered shape replaces it in place;
    /// a new shape is tried after the existing ones.
    pub fn register(&mut self, descriptor: Box<dyn ShapeDescriptor>) {
        let shape = descriptor.shape();
        match self.descriptors.iter_mut().find(|d| d.shape() == shape) {
            Some(slot) => *slot = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    /// Gets the descriptor for a shape.
    pub fn get(&self, shape: DocumentShape) -> Option<&dyn ShapeDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.shape() == shape)
            .map(|d| d.as_ref())
    }

    /// Returns the first descriptor whose signature matches the document.
    pub fn find(&self, root: &Node) -> Option<&dyn ShapeDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.applies_to(root))
            .map(|d| d.as_ref())
    }

    /// Classifies a document.
    pub fn detect(&self, root: &Node) -> Detection {
        match self.find(root) {
            Some(descriptor) => Detection::Recognized(descriptor.shape()),
            None => Detection::Unrecognized,
        }
    }

    /// Iterates descriptors in priority order.
    pub fn descriptors(&self) -> impl Iterator<Item = &dyn ShapeDescriptor> + '_ {
        self.descriptors.iter().map(|d| d.as_ref())
    }

    /// Returns the number of registered shapes.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if no shapes are registered.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

/// Cached default registry with both known shapes.
static DEFAULT_REGISTRY: OnceLock<ShapeRegistry> = OnceLock::new();

/// Returns the registry with the multi-patient and single-patient shapes.
///
/// Multi-patient is tried first: a document whose first entry embeds a
/// patient is multi-patient even if it also has a `recordTarget`.
pub fn default_registry() -> &'static ShapeRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

/// Builds a fresh registry with both known shapes.
pub fn build_default_registry() -> ShapeRegistry {
    let mut registry = ShapeRegistry::new();
    registry.register(Box::new(MultiPatientShape));
    registry.register(Box::new(SinglePatientShape));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_order() {
        let shapes: Vec<_> = default_registry().descriptors().map(|d| d.shape()).collect();
        assert_eq!(
            shapes,
            vec![DocumentShape::MultiPatient, DocumentShape::SinglePatient]
        );
    }

    #[test]
    fn register_replaces_same_shape() {
        let mut registry = build_default_registry();
        registry.register(Box::new(SinglePatientShape));
        assert_eq!(registry.len(), 2);
        assert!(registry.get(DocumentShape::SinglePatient).is_some());
    }

    #[test]
    fn empty_registry_detects_nothing() {
        let registry = ShapeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(
            registry.detect(&Node::element::<_, String>([])),
            Detection::Unrecognized
        );
    }
}
