use image::RgbaImage;
use reqwest::blocking::Client;

use crate::error::{Result, TravelMapError};
use crate::utils::constants::{ESRI_IMAGERY_MAX_ZOOM, ESRI_IMAGERY_URL, TILE_SIZE_PX};

const USER_AGENT: &str = concat!("travelmap/", env!("CARGO_PKG_VERSION"));

/// A slippy-map raster tile provider
pub trait TileSource {
    fn tile_size(&self) -> u32 {
        TILE_SIZE_PX
    }

    fn max_zoom(&self) -> u8;

    fn fetch_tile(&self, zoom: u8, x: u32, y: u32) -> Result<RgbaImage>;
}

/// Esri World Imagery satellite tiles
pub struct EsriWorldImagery {
    client: Client,
    base_url: String,
}

impl EsriWorldImagery {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            base_url: ESRI_IMAGERY_URL.to_string(),
        })
    }

    /// Esri orders the path as zoom/row/column
    pub fn tile_url(&self, zoom: u8, x: u32, y: u32) -> String {
        format!("{}/{}/{}/{}", self.base_url, zoom, y, x)
    }
}

impl TileSource for EsriWorldImagery {
    fn max_zoom(&self) -> u8 {
        ESRI_IMAGERY_MAX_ZOOM
    }

    fn fetch_tile(&self, zoom: u8, x: u32, y: u32) -> Result<RgbaImage> {
        let url = self.tile_url(zoom, x, y);
        tracing::debug!("Fetching tile {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(TravelMapError::HttpStatus {
                status: response.status(),
                url,
            });
        }

        let bytes = response.bytes()?;
        Ok(image::load_from_memory(&bytes)?.to_rgba8())
    }
}
