use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "travelmap")]
#[command(about = "Produce a travel map of German cities and their main stations")]
#[command(version)]
pub struct Cli {
    /// Query station info from bahn.de instead of loading station-info.parquet
    #[arg(long, alias = "refresh_station_info")]
    pub refresh_station_info: bool,

    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}
