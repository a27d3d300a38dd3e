//! QRDA document ingestion.
//!
//! This crate locates clinical XML documents and decodes them into the
//! generic document tree consumed by the extraction core.
//!
//! # Features
//!
//! - **Discovery**: Find `.xml` files in folders and expand CLI inputs
//! - **Decoding**: Turn every `ClinicalDocument` element into a [`Document`](qrda_model::Document)
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use qrda_ingest::{IngestOptions, list_xml_files, load_documents};
//!
//! let files = list_xml_files(Path::new("data/qrda"))?;
//! for file in &files {
//!     let documents = load_documents(file, &IngestOptions::default())?;
//! }
//! ```

mod discovery;
mod error;
mod xml;

// === Error Types ===
pub use error::{IngestError, Result};

// === File Discovery ===
pub use discovery::{collect_input_files, list_xml_files};

// === XML Decoding ===
pub use xml::{DEFAULT_ROW_TAG, IngestOptions, load_documents, parse_documents};
