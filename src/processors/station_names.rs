use std::collections::HashMap;

use crate::utils::constants::MAIN_STATION_SUFFIX;

/// Cities whose station carries the plain city name
const SAME_AS_CITY: [&str; 7] = [
    "Neu-Ulm", "Bocholt", "Hameln", "Hürth", "Bergheim", "Rheine", "Marl",
];

/// Known cases where the search term differs from the city name.
/// The Heidenheim entries point at Rüsselsheim; that is a quirk of the
/// source data and is kept as-is.
const RENAMED: [(&str, &str); 4] = [
    ("Heidenheim an der Brenz", "Rüsselsheim"),
    ("Heidenheim", "Rüsselsheim"),
    ("Bad Homburg vor der Höhe", "Bad Homburg"),
    ("Neustadt an der Weinstraße", "Neustadt(Weinstr)Hbf"),
];

/// Maps a city's display name to the search term the station API expects.
///
/// Explicit overrides win; every other city gets the main station suffix.
#[derive(Debug, Clone)]
pub struct StationNameNormalizer {
    overrides: HashMap<String, String>,
    default_suffix: String,
}

impl StationNameNormalizer {
    /// An empty rule set: every city gets the suffix
    pub fn new(default_suffix: impl Into<String>) -> Self {
        Self {
            overrides: HashMap::new(),
            default_suffix: default_suffix.into(),
        }
    }

    /// The rule set for the German city list
    pub fn german_cities() -> Self {
        let mut normalizer = Self::new(MAIN_STATION_SUFFIX);
        for city in SAME_AS_CITY {
            normalizer = normalizer.with_override(city, city);
        }
        for (city, station) in RENAMED {
            normalizer = normalizer.with_override(city, station);
        }
        normalizer
    }

    pub fn with_override(mut self, city: impl Into<String>, query: impl Into<String>) -> Self {
        self.overrides.insert(city.into(), query.into());
        self
    }

    pub fn overrides(&self) -> &HashMap<String, String> {
        &self.overrides
    }

    pub fn station_query(&self, city_name: &str) -> String {
        match self.overrides.get(city_name) {
            Some(query) => query.clone(),
            None => format!("{}{}", city_name, self.default_suffix),
        }
    }
}

impl Default for StationNameNormalizer {
    fn default() -> Self {
        Self::german_cities()
    }
}
