use std::path::PathBuf;

use qrda_core::BatchOutput;

#[derive(Debug)]
pub struct ExtractResult {
    pub file_count: usize,
    pub document_count: usize,
    pub batch: BatchOutput,
    /// Files that could not be read or decoded.
    pub ingest_errors: Vec<String>,
    /// Where rows were written, when not stdout.
    pub output: Option<PathBuf>,
}

impl ExtractResult {
    pub fn has_errors(&self) -> bool {
        self.batch.has_failures() || !self.ingest_errors.is_empty()
    }
}
