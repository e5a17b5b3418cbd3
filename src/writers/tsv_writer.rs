use std::path::Path;

use crate::error::Result;
use crate::models::StationRecord;

/// Writes the station table as tab-separated text with a header row
pub struct TsvWriter {
    delimiter: u8,
}

impl TsvWriter {
    pub fn new() -> Self {
        Self { delimiter: b'\t' }
    }

    pub fn write_records(&self, records: &[StationRecord], path: &Path) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_path(path)?;

        writer.write_record(crate::models::STATION_COLUMNS)?;
        for record in records {
            writer.write_record(record.to_row())?;
        }
        writer.flush()?;

        tracing::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }
}

impl Default for TsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
