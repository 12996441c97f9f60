//! CSV export functionality
//!
//! Exports the decrypted record collection as plaintext CSV. This is a
//! deliberate plaintext leak surface: the caller must warn the user before
//! handing the output anywhere.

use std::io::Write;

use crate::error::{KeyholdError, KeyholdResult};
use crate::models::RecordCollection;

/// Write the records as CSV with a `"name","value"` header row
///
/// Every field is double-quoted and embedded quotes are doubled, matching
/// the backup format consumers expect.
pub fn write_records_csv<W: Write>(records: &RecordCollection, writer: W) -> KeyholdResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(writer);

    csv_writer
        .write_record(["name", "value"])
        .map_err(|e| KeyholdError::Export(e.to_string()))?;

    for (name, value) in records.iter() {
        csv_writer
            .write_record([name, value])
            .map_err(|e| KeyholdError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| KeyholdError::Export(e.to_string()))?;

    Ok(())
}
