pub mod city;
pub mod station;

pub use city::{City, CityTable, RankComparison, RankFilter};
pub use station::{StationRecord, STATION_COLUMNS};
