use validator::Validate;

use crate::api::{RequestThrottle, StationLookup};
use crate::error::Result;
use crate::models::{City, StationRecord};
use crate::processors::reshaper::reformat_station_info;
use crate::processors::station_names::StationNameNormalizer;
use crate::utils::progress::ProgressReporter;

/// Looks up one station per city, strictly in sequence.
pub struct StationInfoCollector<L> {
    lookup: L,
    normalizer: StationNameNormalizer,
    throttle: RequestThrottle,
}

impl<L: StationLookup> StationInfoCollector<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            normalizer: StationNameNormalizer::default(),
            throttle: RequestThrottle::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: StationNameNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_throttle(mut self, throttle: RequestThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Fetch station info for every city in input order.
    ///
    /// The first failure aborts the whole collection; nothing fetched so far is kept.
    pub fn collect(
        &self,
        cities: &[City],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<StationRecord>> {
        let mut records = Vec::with_capacity(cities.len());

        for city in cities {
            let record = self.collect_one(city)?;
            let line = format!(
                "{} -> {} ({}, {}) [{}]",
                record.original_name, record.name, record.lat, record.lon, record.ext_id
            );
            tracing::debug!("{}", line);
            records.push(record);

            self.throttle.wait();

            // printed above the bar so the two do not interleave
            if let Some(progress) = progress {
                progress.println(&line);
                progress.increment(1);
            }
        }

        Ok(records)
    }

    fn collect_one(&self, city: &City) -> Result<StationRecord> {
        let query = self.normalizer.station_query(&city.name);
        let station_info = self.lookup.find_station(&query)?;
        let record = reformat_station_info(&station_info, &city.name)?;
        record.validate()?;
        Ok(record)
    }
}
