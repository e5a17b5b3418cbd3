pub mod collector;
pub mod pipeline;
pub mod reshaper;
pub mod station_names;

pub use collector::StationInfoCollector;
pub use pipeline::{
    load_cached_station_records, obtain_station_records, persist_station_records, OutputPaths,
    StationInfoSource,
};
pub use reshaper::{reformat_station_info, STATION_INFO_KEYS};
pub use station_names::StationNameNormalizer;
