//! Generic document tree.
//!
//! A decoded clinical document is a tree of named fields. XML attributes and
//! child elements are both plain fields; attributes carry the
//! [`ATTRIBUTE_PREFIX`] so `<code code="8480-6"/>` is reachable as
//! `code/_code`. Repeated sibling elements collapse into a [`Node::List`].
//!
//! Lookups never fail: a missing intermediate node yields `None` and the
//! caller decides whether absence matters.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Prefix applied to attribute names when they become fields.
pub const ATTRIBUTE_PREFIX: &str = "_";

/// Field holding the text content of an element that also has attributes
/// or children.
pub const VALUE_FIELD: &str = "_VALUE";

/// Named children of an element node.
pub type Fields = BTreeMap<String, Node>;

/// One node of a decoded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// Leaf text (an attribute value or a text-only element).
    Text(String),
    /// Structured element with named fields.
    Element(Fields),
    /// Repeated sibling elements, in document order.
    List(Vec<Node>),
}

impl Node {
    /// Creates a text leaf.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Creates an element from `(name, child)` pairs.
    ///
    /// Repeated names are merged into a list, the same way the XML decoder
    /// merges repeated sibling elements.
    pub fn element<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Node)>,
        K: Into<String>,
    {
        let mut map = Fields::new();
        for (name, child) in fields {
            insert_field(&mut map, name.into(), child);
        }
        Node::Element(map)
    }

    /// Returns the named child field.
    ///
    /// A list is looked through to its first item.
    pub fn field(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Element(fields) => fields.get(name),
            Node::List(items) => items.first().and_then(|item| item.field(name)),
            Node::Text(_) => None,
        }
    }

    /// Follows `path` from this node.
    pub fn at(&self, path: FieldPath) -> Option<&Node> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| node.field(segment))
    }

    /// Lists passed through while following `path`.
    ///
    /// Returns the field name and item count of every repeated element met
    /// before the last segment. [`Node::at`] reads only the first item of
    /// each, so the others are skipped.
    pub fn collapsed_lists(&self, path: FieldPath) -> Vec<(&'static str, usize)> {
        let segments = path.segments();
        let mut collapsed = Vec::new();
        let mut node = self;
        for (index, segment) in segments.iter().enumerate() {
            let Some(next) = node.field(segment) else {
                break;
            };
            if let Node::List(items) = next
                && index + 1 < segments.len()
                && items.len() > 1
            {
                collapsed.push((*segment, items.len()));
            }
            node = next;
        }
        collapsed
    }

    /// Returns the leaf text of this node, if it has one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(value) => Some(value.as_str()),
            Node::Element(fields) => fields.get(VALUE_FIELD).and_then(Node::as_text),
            Node::List(items) => items.first().and_then(Node::as_text),
        }
    }

    /// Follows `path` and returns the leaf text found there.
    pub fn text_at(&self, path: FieldPath) -> Option<&str> {
        self.at(path).and_then(Node::as_text)
    }

    /// Views this node as a sequence.
    ///
    /// A single element is a one-item sequence, so a section with exactly
    /// one `<entry>` still exposes an entry list.
    pub fn items(&self) -> &[Node] {
        match self {
            Node::List(items) => items,
            other => std::slice::from_ref(other),
        }
    }
}

/// Adds `child` under `name`, turning repeated names into a list.
pub fn insert_field(fields: &mut Fields, name: String, child: Node) {
    match fields.remove(&name) {
        None => {
            fields.insert(name, child);
        }
        Some(Node::List(mut items)) => {
            items.push(child);
            fields.insert(name, Node::List(items));
        }
        Some(existing) => {
            fields.insert(name, Node::List(vec![existing, child]));
        }
    }
}

/// A static sequence of field names leading from one node to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath(&'static [&'static str]);

impl FieldPath {
    /// The empty path; resolves to the starting node itself.
    pub const ROOT: FieldPath = FieldPath(&[]);

    pub const fn new(segments: &'static [&'static str]) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &'static [&'static str] {
        self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str(".");
        }
        f.write_str(&self.0.join("/"))
    }
}

/// One decoded document and the identity used when reporting on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// File path, suffixed with `#n` when a file holds several documents.
    pub source: String,
    /// The document root (the `ClinicalDocument` element).
    pub root: Node,
}

impl Document {
    pub fn new(source: impl Into<String>, root: Node) -> Self {
        Self {
            source: source.into(),
            root,
        }
    }
}
