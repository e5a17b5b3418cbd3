use std::f64::consts::PI;

/// Web-Mercator latitude limit
pub const MAX_LATITUDE: f64 = 85.051_128_78;

/// Spherical Web-Mercator projection into global pixel space at a given zoom.
///
/// Pixel (0, 0) is the north-west corner of tile (0, 0); y grows southwards.
#[derive(Debug, Clone, Copy)]
pub struct WebMercator {
    zoom: u8,
    tile_size: u32,
}

impl WebMercator {
    pub fn new(zoom: u8, tile_size: u32) -> Self {
        Self { zoom, tile_size }
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Width of the whole world in pixels
    pub fn world_size(&self) -> f64 {
        self.tile_size as f64 * 2f64.powi(self.zoom as i32)
    }

    pub fn tile_count(&self) -> u32 {
        1u32 << self.zoom
    }

    /// Project (lat, lon) to global pixel (x, y)
    pub fn project(&self, lat: f64, lon: f64) -> (f64, f64) {
        let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let world = self.world_size();

        let x = (lon + 180.0) / 360.0 * world;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * world;

        (x, y)
    }
}

/// Geographic bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    /// Bounds of all finite points, or None when there are none
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let mut finite = points
            .iter()
            .filter(|(lat, lon)| lat.is_finite() && lon.is_finite());

        let &(lat, lon) = finite.next()?;
        let mut bounds = Bounds {
            min_lat: lat,
            max_lat: lat,
            min_lon: lon,
            max_lon: lon,
        };

        for &(lat, lon) in finite {
            bounds.min_lat = bounds.min_lat.min(lat);
            bounds.max_lat = bounds.max_lat.max(lat);
            bounds.min_lon = bounds.min_lon.min(lon);
            bounds.max_lon = bounds.max_lon.max(lon);
        }

        Some(bounds)
    }

    /// Grow each side by `fraction` of the span, with a small floor for single points
    pub fn with_margin(&self, fraction: f64) -> Self {
        let lat_pad = ((self.max_lat - self.min_lat) * fraction).max(0.01);
        let lon_pad = ((self.max_lon - self.min_lon) * fraction).max(0.01);

        Bounds {
            min_lat: (self.min_lat - lat_pad).max(-MAX_LATITUDE),
            max_lat: (self.max_lat + lat_pad).min(MAX_LATITUDE),
            min_lon: (self.min_lon - lon_pad).max(-180.0),
            max_lon: (self.max_lon + lon_pad).min(180.0),
        }
    }
}

/// Pixel window of the bounds at a projection: (left, top, width, height)
pub fn pixel_window(bounds: &Bounds, projection: &WebMercator) -> (f64, f64, f64, f64) {
    let (left, top) = projection.project(bounds.max_lat, bounds.min_lon);
    let (right, bottom) = projection.project(bounds.min_lat, bounds.max_lon);
    (left, top, right - left, bottom - top)
}

/// Highest zoom at which the bounds fit in `max_width` x `max_height` pixels
pub fn fit_zoom(
    bounds: &Bounds,
    max_width: u32,
    max_height: u32,
    tile_size: u32,
    max_zoom: u8,
) -> u8 {
    (0..=max_zoom)
        .rev()
        .find(|&zoom| {
            let (_, _, width, height) = pixel_window(bounds, &WebMercator::new(zoom, tile_size));
            width <= max_width as f64 && height <= max_height as f64
        })
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_and_corners() {
        let projection = WebMercator::new(0, 256);
        let (x, y) = projection.project(0.0, 0.0);
        assert!((x - 128.0).abs() < 1e-9);
        assert!((y - 128.0).abs() < 1e-9);

        let (x, y) = projection.project(MAX_LATITUDE, -180.0);
        assert!(x.abs() < 1e-9);
        assert!(y.abs() < 1e-3);
    }

    #[test]
    fn test_known_tile() {
        // Berlin Hbf lies in tile (550, 335) at zoom 10
        let projection = WebMercator::new(10, 256);
        let (x, y) = projection.project(52.5250, 13.3694);
        assert_eq!((x / 256.0) as u32, 550);
        assert_eq!((y / 256.0) as u32, 335);
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let bounds =
            Bounds::from_points(&[(50.0, 8.0), (f64::NAN, 9.0), (54.0, 10.0)]).unwrap();
        assert_eq!(bounds.min_lat, 50.0);
        assert_eq!(bounds.max_lon, 10.0);
        assert!(Bounds::from_points(&[(f64::NAN, f64::NAN)]).is_none());
    }

    #[test]
    fn test_fit_zoom_for_germany() {
        let germany = Bounds {
            min_lat: 47.3,
            max_lat: 55.0,
            min_lon: 5.9,
            max_lon: 15.0,
        };
        // 9.1 degrees of longitude: 3300 px at zoom 9, 6600 px at zoom 10
        assert_eq!(fit_zoom(&germany, 5000, 5000, 256, 18), 9);
    }

    #[test]
    fn test_fit_zoom_limits_height_of_narrow_extent() {
        // Flensburg to Oberstdorf along one meridian: no longitude span at all
        let meridian = Bounds::from_points(&[(54.78, 10.0), (47.57, 10.0)])
            .unwrap()
            .with_margin(0.05);

        let zoom = fit_zoom(&meridian, 5000, 5000, 256, 18);
        let (_, _, width, height) = pixel_window(&meridian, &WebMercator::new(zoom, 256));

        assert!(zoom < 18);
        assert!(width <= 5000.0, "width {} too large", width);
        assert!(height <= 5000.0, "height {} too large", height);
        // one zoom level more would overflow the height
        let (_, _, _, next_height) = pixel_window(&meridian, &WebMercator::new(zoom + 1, 256));
        assert!(next_height > 5000.0);
    }
}
