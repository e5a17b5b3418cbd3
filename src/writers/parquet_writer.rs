use crate::error::{Result, TravelMapError};
use crate::models::{StationRecord, STATION_COLUMNS};
use crate::utils::constants::{DEFAULT_READ_BATCH_SIZE, DEFAULT_ROW_GROUP_SIZE};
use arrow::array::{Array, AsArray, Float32Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Field, Float32Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

pub struct ParquetWriter {
    compression: Compression,
    row_group_size: usize,
}

impl ParquetWriter {
    pub fn new() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: DEFAULT_ROW_GROUP_SIZE,
        }
    }

    /// Write station records to a Parquet file, replacing any existing file
    pub fn write_records(&self, records: &[StationRecord], path: &Path) -> Result<()> {
        let schema = station_schema();
        let batch = records_to_batch(records, schema.clone())?;

        let file = File::create(path)?;
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();

        let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
        writer.write(&batch)?;
        writer.close()?;

        tracing::debug!("Wrote {} records to {}", records.len(), path.display());
        Ok(())
    }

    /// Read every station record back, resolving columns by name
    pub fn read_records(&self, path: &Path) -> Result<Vec<StationRecord>> {
        let file = File::open(path)?;
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
            .with_batch_size(DEFAULT_READ_BATCH_SIZE)
            .build()?;

        let mut records = Vec::new();
        for batch_result in reader {
            let batch = batch_result?;
            let original_names = string_column(&batch, "original_name")?;
            let ext_ids = string_column(&batch, "extId")?;
            let ids = string_column(&batch, "id")?;
            let lats = float_column(&batch, "lat")?;
            let lons = float_column(&batch, "lon")?;
            let names = string_column(&batch, "name")?;

            for i in 0..batch.num_rows() {
                records.push(StationRecord::new(
                    original_names.value(i).to_string(),
                    ext_ids.value(i).to_string(),
                    ids.value(i).to_string(),
                    if lats.is_null(i) { f32::NAN } else { lats.value(i) },
                    if lons.is_null(i) { f32::NAN } else { lons.value(i) },
                    names.value(i).to_string(),
                ));
            }
        }

        Ok(records)
    }

    /// Get file statistics
    pub fn get_file_info(&self, path: &Path) -> Result<ParquetFileInfo> {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let file = File::open(path)?;
        let reader = SerializedFileReader::new(file)?;
        let metadata = reader.metadata();

        let columns = metadata
            .file_metadata()
            .schema_descr()
            .columns()
            .iter()
            .map(|c| c.name().to_string())
            .collect();

        Ok(ParquetFileInfo {
            total_rows: metadata.file_metadata().num_rows(),
            row_groups: metadata.num_row_groups(),
            columns,
            file_size: std::fs::metadata(path)?.len(),
        })
    }
}

impl Default for ParquetWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow schema of the station table
pub fn station_schema() -> Arc<Schema> {
    let fields = STATION_COLUMNS
        .iter()
        .map(|&name| match name {
            "lat" | "lon" => Field::new(name, DataType::Float32, true),
            _ => Field::new(name, DataType::Utf8, true),
        })
        .collect::<Vec<_>>();

    Arc::new(Schema::new(fields))
}

fn records_to_batch(records: &[StationRecord], schema: Arc<Schema>) -> Result<RecordBatch> {
    let original_names: Vec<&str> = records.iter().map(|r| r.original_name.as_str()).collect();
    let ext_ids: Vec<&str> = records.iter().map(|r| r.ext_id.as_str()).collect();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    let lats: Vec<f32> = records.iter().map(|r| r.lat).collect();
    let lons: Vec<f32> = records.iter().map(|r| r.lon).collect();
    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from(original_names)),
            Arc::new(StringArray::from(ext_ids)),
            Arc::new(StringArray::from(ids)),
            Arc::new(Float32Array::from(lats)),
            Arc::new(Float32Array::from(lons)),
            Arc::new(StringArray::from(names)),
        ],
    )?;

    Ok(batch)
}

/// String column by name. Large and view encodings, as written by polars and
/// pyarrow, are narrowed to plain Utf8.
fn string_column(batch: &RecordBatch, name: &str) -> Result<StringArray> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| TravelMapError::MissingColumn(name.to_string()))?;

    match column.data_type() {
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            Ok(cast(column, &DataType::Utf8)?.as_string::<i32>().clone())
        }
        other => Err(TravelMapError::InvalidFormat(format!(
            "Invalid {} column type {}",
            name, other
        ))),
    }
}

/// Coordinate column by name, any float width
fn float_column(batch: &RecordBatch, name: &str) -> Result<Float32Array> {
    let column = batch
        .column_by_name(name)
        .ok_or_else(|| TravelMapError::MissingColumn(name.to_string()))?;

    match column.data_type() {
        DataType::Float16 | DataType::Float32 | DataType::Float64 => Ok(cast(
            column,
            &DataType::Float32,
        )?
        .as_primitive::<Float32Type>()
        .clone()),
        other => Err(TravelMapError::InvalidFormat(format!(
            "Invalid {} column type {}",
            name, other
        ))),
    }
}

#[derive(Debug, Clone)]
pub struct ParquetFileInfo {
    pub total_rows: i64,
    pub row_groups: usize,
    pub columns: Vec<String>,
    pub file_size: u64,
}

impl ParquetFileInfo {
    pub fn summary(&self) -> String {
        format!(
            "Rows: {}, row groups: {}, columns: [{}], size: {:.1} KB",
            self.total_rows,
            self.row_groups,
            self.columns.join(", "),
            self.file_size as f64 / 1024.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    fn sample_records() -> Vec<StationRecord> {
        vec![
            StationRecord::new(
                "Neustadt an der Weinstraße".to_string(),
                "8000275".to_string(),
                "A=1@O=Neustadt(Weinstr)Hbf@X=8140074@Y=49350135@".to_string(),
                49.350136,
                8.140074,
                "Neustadt(Weinstr)Hbf".to_string(),
            ),
            StationRecord::new(
                "Lindau".to_string(),
                "8003693".to_string(),
                "A=1@O=Lindau-Reutin@X=9703289@Y=47552388@".to_string(),
                47.552406,
                9.70284,
                "Lindau-Reutin".to_string(),
            ),
        ]
    }

    #[test]
    fn test_round_trip() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;
        let records = sample_records();

        writer.write_records(&records, temp_file.path())?;
        let read_back = writer.read_records(temp_file.path())?;

        assert_eq!(read_back, records);

        let info = writer.get_file_info(temp_file.path())?;
        assert_eq!(info.total_rows, 2);
        assert_eq!(info.columns, STATION_COLUMNS.to_vec());

        Ok(())
    }

    #[test]
    fn test_write_empty_records() -> Result<()> {
        let writer = ParquetWriter::new();
        let temp_file = NamedTempFile::new()?;

        writer.write_records(&[], temp_file.path())?;

        assert!(writer.read_records(temp_file.path())?.is_empty());
        assert_eq!(writer.get_file_info(temp_file.path())?.total_rows, 0);

        Ok(())
    }

    #[test]
    fn test_schema_types() {
        let schema = station_schema();
        assert_eq!(schema.field_with_name("lat").unwrap().data_type(), &DataType::Float32);
        assert_eq!(schema.field_with_name("extId").unwrap().data_type(), &DataType::Utf8);
    }

    #[test]
    fn test_read_wide_string_and_float_columns() -> Result<()> {
        use arrow::array::{Float64Array, LargeStringArray, StringViewArray};

        let temp_file = NamedTempFile::new()?;
        let schema = Arc::new(Schema::new(vec![
            Field::new("original_name", DataType::LargeUtf8, true),
            Field::new("extId", DataType::LargeUtf8, true),
            Field::new("id", DataType::Utf8View, true),
            Field::new("lat", DataType::Float64, true),
            Field::new("lon", DataType::Float64, true),
            Field::new("name", DataType::Utf8View, true),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(LargeStringArray::from(vec!["Bonn"])),
                Arc::new(LargeStringArray::from(vec!["8000044"])),
                Arc::new(StringViewArray::from(vec!["A=1@O=Bonn Hbf@"])),
                Arc::new(Float64Array::from(vec![50.732_007])),
                Arc::new(Float64Array::from(vec![7.097_136])),
                Arc::new(StringViewArray::from(vec!["Bonn Hbf"])),
            ],
        )?;
        let mut writer = ArrowWriter::try_new(File::create(temp_file.path())?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        let records = ParquetWriter::new().read_records(temp_file.path())?;

        assert_eq!(
            records,
            vec![StationRecord::new(
                "Bonn".to_string(),
                "8000044".to_string(),
                "A=1@O=Bonn Hbf@".to_string(),
                50.732_007,
                7.097_136,
                "Bonn Hbf".to_string(),
            )]
        );

        Ok(())
    }

    #[test]
    fn test_non_text_ext_id_column_is_rejected() -> Result<()> {
        use arrow::array::Int64Array;

        let temp_file = NamedTempFile::new()?;
        let mut fields: Vec<Field> = station_schema()
            .fields()
            .iter()
            .map(|f| f.as_ref().clone())
            .collect();
        fields[1] = Field::new("extId", DataType::Int64, true);
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Bonn"])),
                Arc::new(Int64Array::from(vec![8000044])),
                Arc::new(StringArray::from(vec!["A=1@O=Bonn Hbf@"])),
                Arc::new(Float32Array::from(vec![50.73f32])),
                Arc::new(Float32Array::from(vec![7.10f32])),
                Arc::new(StringArray::from(vec!["Bonn Hbf"])),
            ],
        )?;
        let mut writer = ArrowWriter::try_new(File::create(temp_file.path())?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        let result = ParquetWriter::new().read_records(temp_file.path());
        assert!(matches!(result, Err(TravelMapError::InvalidFormat(_))));

        Ok(())
    }

    #[test]
    fn test_missing_coordinate_column() -> Result<()> {
        let temp_file = NamedTempFile::new()?;
        let schema = Arc::new(Schema::new(vec![
            Field::new("original_name", DataType::Utf8, false),
            Field::new("extId", DataType::Utf8, false),
            Field::new("id", DataType::Utf8, false),
            Field::new("lat", DataType::Float32, false),
            Field::new("name", DataType::Utf8, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Bonn"])),
                Arc::new(StringArray::from(vec!["8000044"])),
                Arc::new(StringArray::from(vec!["A=1@O=Bonn Hbf@"])),
                Arc::new(Float32Array::from(vec![50.73f32])),
                Arc::new(StringArray::from(vec!["Bonn Hbf"])),
            ],
        )?;
        let mut writer = ArrowWriter::try_new(File::create(temp_file.path())?, schema, None)?;
        writer.write(&batch)?;
        writer.close()?;

        match ParquetWriter::new().read_records(temp_file.path()) {
            Err(TravelMapError::MissingColumn(column)) => assert_eq!(column, "lon"),
            other => panic!("expected missing column, got {:?}", other),
        }

        Ok(())
    }
}
