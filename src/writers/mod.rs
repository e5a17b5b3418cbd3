pub mod parquet_writer;
pub mod tsv_writer;

pub use parquet_writer::{station_schema, ParquetFileInfo, ParquetWriter};
pub use tsv_writer::TsvWriter;
