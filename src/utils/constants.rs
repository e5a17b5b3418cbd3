/// File names, relative to the working directory
pub const CITY_PATH: &str = "German-cities.xlsx";
pub const STATION_INFO_OUTPUT_TSV: &str = "station-info.tsv";
pub const STATION_INFO_OUTPUT_PARQUET: &str = "station-info.parquet";
pub const GRAPH_OUTPUT_PATH: &str = "station-info-graph.png";

/// City spreadsheet columns
pub const CITY_NAME_COLUMN: &str = "Name";
pub const CITY_RANK_COLUMN: &str = "Rang";

/// Only cities ranked at or above this are queried
pub const DEFAULT_RANK_LIMIT: &str = "201.";

/// Pause between station requests, before jitter
pub const WAITING_TIME_SECONDS_STATION_INFO: u64 = 2;

/// Appended to a city name to guess its main station
pub const MAIN_STATION_SUFFIX: &str = " Hbf";

/// Map output
pub const MAP_TARGET_WIDTH_PX: u32 = 5000;
pub const MAP_MAX_HEIGHT_PX: u32 = 5000;
pub const MAP_MARGIN_FRACTION: f64 = 0.05;
pub const POINT_DIAMETER_PX: u32 = 14;
pub const POINT_ALPHA: f32 = 0.7;
pub const POINT_COLOR_RGB: [u8; 3] = [31, 119, 180];

/// Tile provider
pub const ESRI_IMAGERY_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile";
pub const TILE_SIZE_PX: u32 = 256;
pub const ESRI_IMAGERY_MAX_ZOOM: u8 = 18;

/// Parquet defaults
pub const DEFAULT_ROW_GROUP_SIZE: usize = 10000;
pub const DEFAULT_READ_BATCH_SIZE: usize = 8192;
