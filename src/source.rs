//! Reads URL records out of a headerless CSV file.
//!
//! Only the first column of each row is used. Fields are read as raw bytes
//! and converted lossily, so a stray non-UTF-8 byte in one URL does not
//! stop the run. Opening and I/O failures surface as [`Error::Source`],
//! which the pipeline treats as fatal.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;

fn reader(path: &Path) -> Result<csv::Reader<File>> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::Source(format!("cannot open {}: {}", path.display(), e)))
}

pub type Records = Box<dyn Iterator<Item = Result<String>> + Send>;

/// Lazily yields the first column of every row in `path`.
pub fn open_records(path: &Path) -> Result<Records> {
    let display = path.display().to_string();
    let records = reader(path)?.into_byte_records().map(move |row| match row {
        Ok(record) => Ok(String::from_utf8_lossy(record.get(0).unwrap_or_default()).into_owned()),
        Err(e) => Err(Error::Source(format!("cannot read {}: {}", display, e))),
    });
    Ok(Box::new(records))
}

/// Counts rows with a non-empty first column, i.e. the number of results
/// a complete run will record.
pub fn count_records(path: &Path) -> Result<u64> {
    let mut count = 0;
    for record in open_records(path)? {
        if !record?.trim().is_empty() {
            count += 1;
        }
    }
    Ok(count)
}
