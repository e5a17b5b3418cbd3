use std::path::{Path, PathBuf};

use crate::api::StationLookup;
use crate::error::{Result, TravelMapError};
use crate::models::{City, StationRecord};
use crate::processors::collector::StationInfoCollector;
use crate::utils::constants::{
    GRAPH_OUTPUT_PATH, STATION_INFO_OUTPUT_PARQUET, STATION_INFO_OUTPUT_TSV,
};
use crate::utils::progress::ProgressReporter;
use crate::writers::{ParquetWriter, TsvWriter};

/// Where station info comes from on this run
pub enum StationInfoSource<L> {
    /// Query the station API for every city and overwrite the stored tables
    Refresh(StationInfoCollector<L>),
    /// Reuse the Parquet table written by an earlier refresh
    Cached,
}

impl<L: StationLookup> StationInfoSource<L> {
    /// Pick the source for the command line flag. `collector` only runs when refreshing,
    /// so cached runs never build an HTTP client.
    pub fn from_refresh_flag<F>(refresh: bool, collector: F) -> Result<Self>
    where
        F: FnOnce() -> Result<StationInfoCollector<L>>,
    {
        if refresh {
            Ok(StationInfoSource::Refresh(collector()?))
        } else {
            Ok(StationInfoSource::Cached)
        }
    }

    pub fn is_refresh(&self) -> bool {
        matches!(self, StationInfoSource::Refresh(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub tsv: PathBuf,
    pub parquet: PathBuf,
    pub graph: PathBuf,
}

impl OutputPaths {
    /// All three outputs inside `dir`, with the default file names
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            tsv: dir.join(STATION_INFO_OUTPUT_TSV),
            parquet: dir.join(STATION_INFO_OUTPUT_PARQUET),
            graph: dir.join(GRAPH_OUTPUT_PATH),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            tsv: PathBuf::from(STATION_INFO_OUTPUT_TSV),
            parquet: PathBuf::from(STATION_INFO_OUTPUT_PARQUET),
            graph: PathBuf::from(GRAPH_OUTPUT_PATH),
        }
    }
}

/// Write the station table to both the TSV and the Parquet path
pub fn persist_station_records(records: &[StationRecord], paths: &OutputPaths) -> Result<()> {
    for path in [&paths.tsv, &paths.parquet] {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    TsvWriter::new().write_records(records, &paths.tsv)?;
    ParquetWriter::new().write_records(records, &paths.parquet)?;

    tracing::info!(
        "Stored {} station records in {} and {}",
        records.len(),
        paths.tsv.display(),
        paths.parquet.display()
    );
    Ok(())
}

/// Load the station table from an earlier refresh
pub fn load_cached_station_records(paths: &OutputPaths) -> Result<Vec<StationRecord>> {
    if !paths.parquet.exists() {
        return Err(TravelMapError::CacheMissing {
            path: paths.parquet.clone(),
        });
    }

    let records = ParquetWriter::new().read_records(&paths.parquet)?;
    tracing::info!(
        "Loaded {} cached station records from {}",
        records.len(),
        paths.parquet.display()
    );
    Ok(records)
}

/// Produce the station table for `cities`, either fresh from the API or from disk
pub fn obtain_station_records<L: StationLookup>(
    source: &StationInfoSource<L>,
    cities: &[City],
    paths: &OutputPaths,
    progress: Option<&ProgressReporter>,
) -> Result<Vec<StationRecord>> {
    match source {
        StationInfoSource::Refresh(collector) => {
            let records = collector.collect(cities, progress)?;
            persist_station_records(&records, paths)?;
            Ok(records)
        }
        StationInfoSource::Cached => load_cached_station_records(paths),
    }
}
