// src/config/csv_check.rs

use std::path::Path;

use tracing::debug;

use crate::errors::CsvError;
use crate::fs::FileSystem;

/// Check that `path` exists and reads as CSV from start to end.
///
/// Rows are not interpreted. Empty files, header-only files and rows of
/// differing width are all accepted; only structural read errors (such as
/// invalid UTF-8) fail.
pub fn check_csv_file(path: &Path, fs: &dyn FileSystem) -> Result<(), CsvError> {
    if !fs.exists(path) {
        return Err(CsvError::NotFound(path.to_path_buf()));
    }

    let reader = fs.open_read(path).map_err(|e| CsvError::Unreadable {
        path: path.to_path_buf(),
        reason: format!("{e:#}"),
    })?;

    let mut csv = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = 0usize;
    for record in csv.records() {
        record.map_err(|source| CsvError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
        rows += 1;
    }

    debug!(path = %path.display(), rows, "CSV file is readable");
    Ok(())
}
