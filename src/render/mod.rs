pub mod map_renderer;
pub mod projection;
pub mod tiles;

pub use map_renderer::MapRenderer;
pub use projection::{Bounds, WebMercator};
pub use tiles::{EsriWorldImagery, TileSource};
