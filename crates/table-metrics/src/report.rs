use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::WriterBuilder;
use log::info;

use crate::error::Result;
use crate::types::DerivedMetrics;

/// Write the metrics records as CSV. The header row is always emitted,
/// even when no table produced a record.
pub fn write_csv<W: Write>(writer: W, records: &[DerivedMetrics]) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

    csv_writer.write_record(DerivedMetrics::CSV_HEADERS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the metrics records to a CSV file at `path`.
pub fn write_csv_file(path: &Path, records: &[DerivedMetrics]) -> Result<()> {
    let file = File::create(path)?;
    write_csv(file, records)?;
    info!("wrote {} rows to {}", records.len(), path.display());
    Ok(())
}
