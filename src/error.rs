use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TravelMapError>;

#[derive(Error, Debug)]
pub enum TravelMapError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Station search returned no candidates for '{query}'")]
    EmptyResult { query: String },

    #[error("Station info is missing field '{field}'")]
    MissingField { field: String },

    #[error("Station info field '{field}' is not a {expected}")]
    InvalidField { field: String, expected: &'static str },

    #[error("Column '{0}' not found")]
    MissingColumn(String),

    #[error("Cached station info not found at {}; run with --refresh-station-info", .path.display())]
    CacheMissing { path: PathBuf },

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required data: {0}")]
    MissingData(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),
}
