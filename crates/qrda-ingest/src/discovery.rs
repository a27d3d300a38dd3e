//! Input file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Lists all XML files in a directory.
///
/// Returns files sorted by filename.
pub fn list_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        if is_xml_file(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Expands command-line inputs into a list of document files.
///
/// Directories contribute their XML files; files are kept as given, in
/// input order.
pub fn collect_input_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_xml_files(input)?);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(IngestError::FileNotFound {
                path: input.clone(),
            });
        }
    }
    Ok(files)
}

/// Checks for an `.xml` extension (case-insensitive).
fn is_xml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xml_extension_is_case_insensitive() {
        assert!(is_xml_file(Path::new("a.xml")));
        assert!(is_xml_file(Path::new("B.XML")));
        assert!(!is_xml_file(Path::new("c.csv")));
        assert!(!is_xml_file(Path::new("xml")));
    }
}
