use serde_json::Value;

use crate::error::{Result, TravelMapError};
use crate::models::StationRecord;

/// Keys read from a station search candidate, in output column order
pub const STATION_INFO_KEYS: [&str; 5] = ["extId", "id", "lat", "lon", "name"];

/// Flatten a station search candidate plus the city it was found for into an output row
pub fn reformat_station_info(station_info: &Value, city_name: &str) -> Result<StationRecord> {
    let [ext_id, id, lat, lon, name] = STATION_INFO_KEYS;

    Ok(StationRecord::new(
        city_name.to_string(),
        identifier_field(station_info, ext_id)?,
        identifier_field(station_info, id)?,
        coordinate_field(station_info, lat)?,
        coordinate_field(station_info, lon)?,
        text_field(station_info, name)?,
    ))
}

fn field<'a>(station_info: &'a Value, key: &str) -> Result<&'a Value> {
    station_info
        .get(key)
        .ok_or_else(|| TravelMapError::MissingField {
            field: key.to_string(),
        })
}

fn text_field(station_info: &Value, key: &str) -> Result<String> {
    match field(station_info, key)? {
        Value::String(s) => Ok(s.clone()),
        _ => Err(TravelMapError::InvalidField {
            field: key.to_string(),
            expected: "string",
        }),
    }
}

/// Identifiers are strings in practice but numbers are accepted too
fn identifier_field(station_info: &Value, key: &str) -> Result<String> {
    match field(station_info, key)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(TravelMapError::InvalidField {
            field: key.to_string(),
            expected: "string or number",
        }),
    }
}

fn coordinate_field(station_info: &Value, key: &str) -> Result<f32> {
    field(station_info, key)?
        .as_f64()
        .map(|v| v as f32)
        .ok_or_else(|| TravelMapError::InvalidField {
            field: key.to_string(),
            expected: "number",
        })
}
