use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::Write;
use tempfile::{Builder, TempDir};
use travelmap::api::{RequestThrottle, StationLookup};
use travelmap::models::RankFilter;
use travelmap::processors::{
    obtain_station_records, OutputPaths, StationInfoCollector, StationInfoSource,
};
use travelmap::readers::CityReader;
use travelmap::writers::ParquetWriter;
use travelmap::{Result, TravelMapError};

/// Fixed answers keyed by search term
struct FixtureLookup {
    responses: HashMap<&'static str, Value>,
}

impl FixtureLookup {
    fn new() -> Self {
        let mut responses = HashMap::new();
        responses.insert(
            "Neustadt(Weinstr)Hbf",
            json!({
                "extId": "8000275",
                "id": "A=1@O=Neustadt(Weinstr)Hbf@X=8140074@Y=49350135@U=80@L=8000275@",
                "lat": 49.350136,
                "lon": 8.140074,
                "name": "Neustadt(Weinstr)Hbf"
            }),
        );
        responses.insert(
            "Kiel Hbf",
            json!({
                "extId": "8000199",
                "id": "A=1@O=Kiel Hbf@X=10131976@Y=54314982@U=80@L=8000199@",
                "lat": 54.314982,
                "lon": 10.131976,
                "name": "Kiel Hbf"
            }),
        );
        Self { responses }
    }
}

impl StationLookup for FixtureLookup {
    fn find_station(&self, query: &str) -> Result<Value> {
        self.responses
            .get(query)
            .cloned()
            .ok_or_else(|| TravelMapError::EmptyResult {
                query: query.to_string(),
            })
    }
}

#[test]
fn test_refresh_then_cached_run() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let mut city_file = Builder::new().suffix(".csv").tempfile_in(temp_dir.path())?;
    writeln!(city_file, "Rang,Name,Bundesland")?;
    writeln!(city_file, "177.,Neustadt an der Weinstraße,Rheinland-Pfalz")?;
    writeln!(city_file, "20.,Kiel,Schleswig-Holstein")?;
    writeln!(city_file, "250.,Zweibrücken,Rheinland-Pfalz")?;

    let cities = CityReader::new()
        .read_cities(city_file.path())?
        .filter_by_rank(&RankFilter::default())?
        .cities()?;
    assert_eq!(cities.len(), 2);

    let paths = OutputPaths::in_dir(temp_dir.path());
    let refresh = StationInfoSource::Refresh(
        StationInfoCollector::new(FixtureLookup::new()).with_throttle(RequestThrottle::disabled()),
    );

    let fetched = obtain_station_records(&refresh, &cities, &paths, None)?;

    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].original_name, "Neustadt an der Weinstraße");
    assert_eq!(fetched[0].name, "Neustadt(Weinstr)Hbf");
    assert_eq!(fetched[1].original_name, "Kiel");
    assert_eq!(fetched[1].ext_id, "8000199");
    assert_eq!(fetched[1].lat, 54.314982_f32);

    assert!(paths.tsv.exists());
    let tsv = std::fs::read_to_string(&paths.tsv)?;
    assert_eq!(tsv.lines().count(), 3);
    assert!(tsv.starts_with("original_name\textId\tid\tlat\tlon\tname\n"));

    let info = ParquetWriter::new().get_file_info(&paths.parquet)?;
    assert_eq!(info.total_rows, 2);

    let cached =
        obtain_station_records(&StationInfoSource::<FixtureLookup>::Cached, &cities, &paths, None)?;
    assert_eq!(cached, fetched);

    Ok(())
}

#[test]
fn test_unknown_station_aborts_without_writing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let paths = OutputPaths::in_dir(temp_dir.path());
    let refresh = StationInfoSource::Refresh(
        StationInfoCollector::new(FixtureLookup::new()).with_throttle(RequestThrottle::disabled()),
    );
    let cities = vec![
        travelmap::models::City::new("Kiel", "20."),
        travelmap::models::City::new("Atlantis", "21."),
    ];

    let result = obtain_station_records(&refresh, &cities, &paths, None);

    assert!(matches!(result, Err(TravelMapError::EmptyResult { .. })));
    assert!(!paths.tsv.exists());
    assert!(!paths.parquet.exists());

    Ok(())
}
