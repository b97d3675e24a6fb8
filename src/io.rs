//! Reading documents and writing reports.

use crate::Result;
use crate::engine::Report;
use std::fs;
use std::path::Path;

/// Read a whole UTF-8 document.
pub fn read_document(path: impl AsRef<Path>) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write `report` as CSV: one header record, then one record per row.
pub fn write_csv<W: std::io::Write>(report: &Report, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(report.columns())?;
    for row in report.rows() {
        wtr.write_record(row.cells())?;
    }

    wtr.flush()?;
    Ok(())
}
