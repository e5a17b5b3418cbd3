use serde::{Deserialize, Serialize};
use validator::Validate;

/// Column names of the persisted station table, in order
pub const STATION_COLUMNS: [&str; 6] = ["original_name", "extId", "id", "lat", "lon", "name"];

/// One output row: the city we searched for plus the first station the API returned
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct StationRecord {
    pub original_name: String,

    #[serde(rename = "extId")]
    pub ext_id: String,

    pub id: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f32,

    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f32,

    pub name: String,
}

impl StationRecord {
    pub fn new(
        original_name: String,
        ext_id: String,
        id: String,
        lat: f32,
        lon: f32,
        name: String,
    ) -> Self {
        Self {
            original_name,
            ext_id,
            id,
            lat,
            lon,
            name,
        }
    }

    /// The six cells in `STATION_COLUMNS` order
    pub fn to_row(&self) -> [String; 6] {
        [
            self.original_name.clone(),
            self.ext_id.clone(),
            self.id.clone(),
            self.lat.to_string(),
            self.lon.to_string(),
            self.name.clone(),
        ]
    }

    pub fn has_finite_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}
