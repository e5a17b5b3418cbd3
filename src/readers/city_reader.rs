use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

use crate::error::{Result, TravelMapError};
use crate::models::CityTable;

pub struct CityReader {
    sheet_index: usize,
}

impl CityReader {
    pub fn new() -> Self {
        Self { sheet_index: 0 }
    }

    /// Read the city table. Spreadsheets go through calamine, `.csv`/`.tsv` through the csv crate.
    pub fn read_cities(&self, path: &Path) -> Result<CityTable> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let table = match extension.as_deref() {
            Some("csv") => self.read_delimited(path, b',')?,
            Some("tsv") => self.read_delimited(path, b'\t')?,
            _ => self.read_spreadsheet(path)?,
        };

        tracing::debug!(
            "Loaded {} cities with {} columns from {}",
            table.len(),
            table.columns().len(),
            path.display()
        );

        Ok(table)
    }

    fn read_spreadsheet(&self, path: &Path) -> Result<CityTable> {
        let mut workbook = open_workbook_auto(path)?;
        let range = workbook.worksheet_range_at(self.sheet_index).ok_or_else(|| {
            TravelMapError::MissingData(format!(
                "Worksheet {} not found in {}",
                self.sheet_index,
                path.display()
            ))
        })??;

        let mut rows = range.rows();
        let columns: Vec<String> = match rows.next() {
            Some(header) => header.iter().map(cell_to_string).collect(),
            None => {
                return Err(TravelMapError::MissingData(format!(
                    "Worksheet {} in {} is empty",
                    self.sheet_index,
                    path.display()
                )))
            }
        };

        let rows = rows
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        Ok(CityTable::new(columns, rows))
    }

    fn read_delimited(&self, path: &Path, delimiter: u8) -> Result<CityTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_path(path)?;

        let columns = reader.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(CityTable::new(columns, rows))
    }
}

impl Default for CityReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a cell as text; whole floats lose their fraction so 12.0 reads "12"
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        other => format!("{:?}", other),
    }
}
