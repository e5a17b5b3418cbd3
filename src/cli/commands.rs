use std::path::Path;

use crate::api::BahnStationClient;
use crate::cli::args::Cli;
use crate::error::Result;
use crate::models::RankFilter;
use crate::processors::{
    obtain_station_records, OutputPaths, StationInfoCollector, StationInfoSource,
};
use crate::readers::CityReader;
use crate::render::{EsriWorldImagery, MapRenderer};
use crate::utils::constants::CITY_PATH;
use crate::utils::progress::ProgressReporter;
use crate::writers::ParquetWriter;

pub fn run(cli: Cli) -> Result<()> {
    let paths = OutputPaths::default();

    let cities = CityReader::new().read_cities(Path::new(CITY_PATH))?;
    let cities = cities.filter_by_rank(&RankFilter::default())?.cities()?;
    tracing::info!("{} cities pass the rank filter", cities.len());

    let source = StationInfoSource::from_refresh_flag(cli.refresh_station_info, || {
        Ok(StationInfoCollector::new(BahnStationClient::new()?))
    })?;
    let progress = if source.is_refresh() {
        println!("Getting city details, with some wait between the requests");
        ProgressReporter::new(cities.len() as u64, "Fetching station info...", false)
    } else {
        ProgressReporter::silent()
    };

    let records = obtain_station_records(&source, &cities, &paths, Some(&progress))?;

    if source.is_refresh() {
        progress.finish_with_message(&format!("Fetched {} stations", records.len()));
        let file_info = ParquetWriter::new().get_file_info(&paths.parquet)?;
        println!("{}", file_info.summary());
    }

    let progress = ProgressReporter::new_spinner("Rendering map...", false);
    MapRenderer::new(EsriWorldImagery::new()?).save(&records, &paths.graph)?;
    progress.finish_with_message(&format!("Map written to {}", paths.graph.display()));

    Ok(())
}
