pub mod bahn;
pub mod throttle;

pub use bahn::{first_candidate, BahnStationClient};
pub use throttle::RequestThrottle;

use serde_json::Value;

use crate::error::Result;

/// Resolves a search term to the station search's first candidate.
pub trait StationLookup {
    fn find_station(&self, query: &str) -> Result<Value>;
}

impl<T: StationLookup + ?Sized> StationLookup for &T {
    fn find_station(&self, query: &str) -> Result<Value> {
        (**self).find_station(query)
    }
}
