use crate::constants::OUTPUT_COLUMNS;
use crate::error::Result;
use crate::types::ExtractedRecord;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Writes the records as CSV with a header row, creating parent directories.
pub fn write_records(path: &Path, records: &[ExtractedRecord]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_records_to(file, records)?;
    info!(path = %path.display(), rows = records.len(), "Wrote registration CSV");
    Ok(())
}

/// The header is written explicitly so an empty table still has its four columns.
pub fn write_records_to<W: Write>(writer: W, records: &[ExtractedRecord]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
