//! CSV catalog source.
//!
//! The first row is the header. Rows may be shorter than the header; missing
//! trailing fields read as empty. A leading UTF-8 byte-order mark is ignored.

use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::importer::ImportError;
use crate::record::CatalogRecord;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read every record from the CSV file at `path`.
///
/// A missing file is reported as [`ImportError::SourceNotFound`].
pub fn read_csv(path: &Path) -> Result<Vec<CatalogRecord>, ImportError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ImportError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => ImportError::Io(e),
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read catalog source");
    read_csv_from(bytes.as_slice())
}

/// Read every record from CSV data.
pub fn read_csv_from<R: Read>(mut reader: R) -> Result<Vec<CatalogRecord>, ImportError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    let body = data.strip_prefix(UTF8_BOM).unwrap_or(data.as_slice());

    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body);
    let headers: Vec<String> = csv
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for row in csv.records() {
        let row = row?;
        let record: CatalogRecord = headers
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), row.get(i).unwrap_or("").to_string()))
            .collect();
        records.push(record);
    }
    Ok(records)
}
