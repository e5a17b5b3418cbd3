use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use serde_json::Value;

use super::StationLookup;
use crate::error::{Result, TravelMapError};

const URL_STATION: &str = "https://www.bahn.de/web/api/reiseloesung/orte";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0";

const HEADERS_STATION: [(&str, &str); 9] = [
    ("accept", "application/json"),
    ("accept-language", "de"),
    (
        "x-correlation-id",
        "6b47ec5c-b18e-4a22-b397-36b555f2455c_b7e3c565-98e5-4368-a0b3-606f4b9d237a",
    ),
    ("connection", "keep-alive"),
    ("referer", "https://www.bahn.de/"),
    ("sec-fetch-dest", "empty"),
    ("sec-fetch-mode", "cors"),
    ("sec-fetch-site", "same-origin"),
    ("sec-gpc", "1"),
];

const SEARCH_TYPE: &str = "ALL";
const SEARCH_LIMIT: &str = "10";

/// Client for the bahn.de location search.
///
/// One blocking GET per query, no retries. The first of up to ten ranked
/// candidates is returned without any disambiguation.
pub struct BahnStationClient {
    client: Client,
    url: String,
}

impl BahnStationClient {
    pub fn new() -> Result<Self> {
        Self::with_url(URL_STATION)
    }

    pub fn with_url(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers())
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl StationLookup for BahnStationClient {
    fn find_station(&self, query: &str) -> Result<Value> {
        tracing::debug!("Searching station '{}'", query);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("suchbegriff", query),
                ("typ", SEARCH_TYPE),
                ("limit", SEARCH_LIMIT),
            ])
            .send()?;

        if !response.status().is_success() {
            return Err(TravelMapError::HttpStatus {
                status: response.status(),
                url: response.url().to_string(),
            });
        }

        let body: Value = response.json()?;
        first_candidate(body, query)
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    for (name, value) in HEADERS_STATION {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
    headers
}

/// Take the first element of the search response array
pub fn first_candidate(body: Value, query: &str) -> Result<Value> {
    match body {
        Value::Array(candidates) => {
            candidates
                .into_iter()
                .next()
                .ok_or_else(|| TravelMapError::EmptyResult {
                    query: query.to_string(),
                })
        }
        other => Err(TravelMapError::InvalidFormat(format!(
            "Expected a JSON array of stations for '{}', got {}",
            query, other
        ))),
    }
}
