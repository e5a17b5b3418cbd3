use image::{imageops, Pixel, Rgba, RgbaImage};
use std::path::Path;

use super::projection::{fit_zoom, pixel_window, Bounds, WebMercator};
use super::tiles::TileSource;
use crate::error::{Result, TravelMapError};
use crate::models::StationRecord;
use crate::utils::constants::{
    MAP_MARGIN_FRACTION, MAP_MAX_HEIGHT_PX, MAP_TARGET_WIDTH_PX, POINT_ALPHA, POINT_COLOR_RGB,
    POINT_DIAMETER_PX,
};

/// Draws station points over a satellite basemap
pub struct MapRenderer<T> {
    tiles: T,
    max_width: u32,
    max_height: u32,
    margin: f64,
    point_diameter: u32,
    point_color: Rgba<u8>,
}

impl<T: TileSource> MapRenderer<T> {
    pub fn new(tiles: T) -> Self {
        let [r, g, b] = POINT_COLOR_RGB;
        Self {
            tiles,
            max_width: MAP_TARGET_WIDTH_PX,
            max_height: MAP_MAX_HEIGHT_PX,
            margin: MAP_MARGIN_FRACTION,
            point_diameter: POINT_DIAMETER_PX,
            point_color: Rgba([r, g, b, (POINT_ALPHA * 255.0).round() as u8]),
        }
    }

    /// Canvas size limit; the zoom is the highest at which the points fit
    pub fn with_max_size(mut self, width: u32, height: u32) -> Self {
        self.max_width = width.max(1);
        self.max_height = height.max(1);
        self
    }

    /// Render the map and write it as an image; the format follows the file extension
    pub fn save(&self, records: &[StationRecord], path: &Path) -> Result<()> {
        let canvas = self.render(records)?;
        canvas.save(path)?;
        tracing::info!(
            "Saved {}x{} map with {} points to {}",
            canvas.width(),
            canvas.height(),
            records.len(),
            path.display()
        );
        Ok(())
    }

    pub fn render(&self, records: &[StationRecord]) -> Result<RgbaImage> {
        let points: Vec<(f64, f64)> = records
            .iter()
            .filter(|r| r.has_finite_coordinates())
            .map(|r| (r.lat as f64, r.lon as f64))
            .collect();

        let bounds = Bounds::from_points(&points)
            .ok_or_else(|| {
                TravelMapError::MissingData("No station coordinates to plot".to_string())
            })?
            .with_margin(self.margin);

        let tile_size = self.tiles.tile_size();
        let zoom = fit_zoom(
            &bounds,
            self.max_width,
            self.max_height,
            tile_size,
            self.tiles.max_zoom(),
        );
        let projection = WebMercator::new(zoom, tile_size);

        let (left, top, width, height) = pixel_window(&bounds, &projection);
        let left = left.floor() as i64;
        let top = top.floor() as i64;
        let width = (width.ceil() as u32).max(1);
        let height = (height.ceil() as u32).max(1);

        tracing::debug!("Rendering {}x{} px at zoom {}", width, height, zoom);

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255]));
        self.draw_basemap(&mut canvas, &projection, left, top)?;

        for &(lat, lon) in &points {
            let (x, y) = projection.project(lat, lon);
            self.draw_point(&mut canvas, x - left as f64, y - top as f64);
        }

        Ok(canvas)
    }

    fn draw_basemap(
        &self,
        canvas: &mut RgbaImage,
        projection: &WebMercator,
        left: i64,
        top: i64,
    ) -> Result<()> {
        let tile_size = self.tiles.tile_size() as i64;
        let last_tile = projection.tile_count() as i64 - 1;

        let first_x = (left / tile_size).clamp(0, last_tile);
        let last_x = ((left + canvas.width() as i64 - 1) / tile_size).clamp(0, last_tile);
        let first_y = (top / tile_size).clamp(0, last_tile);
        let last_y = ((top + canvas.height() as i64 - 1) / tile_size).clamp(0, last_tile);

        for ty in first_y..=last_y {
            for tx in first_x..=last_x {
                let tile = self
                    .tiles
                    .fetch_tile(projection.zoom(), tx as u32, ty as u32)?;
                imageops::overlay(
                    canvas,
                    &tile,
                    tx * tile_size - left,
                    ty * tile_size - top,
                );
            }
        }

        Ok(())
    }

    fn draw_point(&self, canvas: &mut RgbaImage, cx: f64, cy: f64) {
        let radius = self.point_diameter as f64 / 2.0;
        let reach = radius.ceil() as i64;
        let (cx_px, cy_px) = (cx.round() as i64, cy.round() as i64);

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let (x, y) = (cx_px + dx, cy_px + dy);
                if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
                    continue;
                }
                let (fx, fy) = (x as f64 + 0.5 - cx, y as f64 + 0.5 - cy);
                if fx * fx + fy * fy <= radius * radius {
                    canvas
                        .get_pixel_mut(x as u32, y as u32)
                        .blend(&self.point_color);
                }
            }
        }
    }
}
