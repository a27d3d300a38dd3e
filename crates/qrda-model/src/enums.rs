//! Type-safe enumerations for document shapes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Structural shape of a QRDA-style document.
///
/// Shape is a document-level property: it fixes the traversal and
/// combination rule for every entry in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentShape {
    /// One patient under `recordTarget`, one observation per entry.
    SinglePatient,
    /// Every entry embeds its own patient with a single observation.
    MultiPatient,
}

impl DocumentShape {
    /// Returns the stable name used in CLI flags and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentShape::SinglePatient => "single-patient",
            DocumentShape::MultiPatient => "multi-patient",
        }
    }
}

impl fmt::Display for DocumentShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DocumentShape {
    type Err = String;

    /// Parse a shape name (case-insensitive, `-` or `_` separated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");

        match normalized.as_str() {
            "single-patient" | "single" => Ok(DocumentShape::SinglePatient),
            "multi-patient" | "multi" => Ok(DocumentShape::MultiPatient),
            _ => Err(format!("Unknown document shape: {s}")),
        }
    }
}

/// Outcome of shape detection for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// The document matches a known shape.
    Recognized(DocumentShape),
    /// Neither known signature was found.
    Unrecognized,
}

impl Detection {
    pub fn shape(&self) -> Option<DocumentShape> {
        match self {
            Detection::Recognized(shape) => Some(*shape),
            Detection::Unrecognized => None,
        }
    }
}

impl fmt::Display for Detection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Detection::Recognized(shape) => write!(f, "{shape}"),
            Detection::Unrecognized => f.write_str("unrecognized"),
        }
    }
}
