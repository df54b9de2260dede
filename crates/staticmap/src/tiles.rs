//! XYZ tile pyramid math over Web Mercator.

use projection::mercator::MAX_EXTENT;

/// Tile edge length in pixels for all supported providers.
pub const TILE_SIZE: u32 = 256;

/// A tile coordinate (z/x/y), top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level
    pub z: u32,
    /// Column (x)
    pub x: u32,
    /// Row (y)
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

/// Number of tiles per axis at a zoom level.
pub fn tile_count(zoom: u32) -> u32 {
    1u32 << zoom
}

/// Tile span in Web Mercator meters at a zoom level.
pub fn tile_span_m(zoom: u32) -> f64 {
    2.0 * MAX_EXTENT / tile_count(zoom) as f64
}

/// Fractional tile column/row of a Web Mercator coordinate.
///
/// The integer parts are the tile indices; the fractional parts locate the
/// point inside that tile.
pub fn mercator_to_tile_frac(x: f64, y: f64, zoom: u32) -> (f64, f64) {
    let n = tile_count(zoom) as f64;
    let col = (x + MAX_EXTENT) / (2.0 * MAX_EXTENT) * n;
    let row = (MAX_EXTENT - y) / (2.0 * MAX_EXTENT) * n;
    (col, row)
}

/// Web Mercator coordinate of a tile's top-left corner.
pub fn tile_top_left_mercator(col: i64, row: i64, zoom: u32) -> (f64, f64) {
    let span = tile_span_m(zoom);
    (
        col as f64 * span - MAX_EXTENT,
        MAX_EXTENT - row as f64 * span,
    )
}

/// Fractional tile column/row of a geographic coordinate (slippy-map
/// formula, no intermediate meter projection).
pub fn latlon_to_tile_frac(lon: f64, lat: f64, zoom: u32) -> (f64, f64) {
    let n = tile_count(zoom) as f64;
    let col = (lon + 180.0) / 360.0 * n;
    let lat_rad = lat.to_radians();
    let row = (1.0 - lat_rad.tan().asinh() / std::f64::consts::PI) / 2.0 * n;
    (col, row)
}

/// Tile containing a geographic coordinate.
pub fn latlon_to_tile(lon: f64, lat: f64, zoom: u32) -> TileCoord {
    let (col, row) = latlon_to_tile_frac(lon, lat, zoom);
    let max = (tile_count(zoom) - 1) as f64;
    TileCoord {
        z: zoom,
        x: col.floor().clamp(0.0, max) as u32,
        y: row.floor().clamp(0.0, max) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_zero_is_single_tile() {
        assert_eq!(latlon_to_tile(-73.4, 5.5, 0), TileCoord::new(0, 0, 0));
        assert_eq!(latlon_to_tile(151.2, -33.9, 0), TileCoord::new(0, 0, 0));
    }

    #[test]
    fn test_origin_maps_to_grid_center() {
        let (col, row) = mercator_to_tile_frac(0.0, 0.0, 4);
        assert!((col - 8.0).abs() < 1e-9);
        assert!((row - 8.0).abs() < 1e-9);

        let (col, row) = latlon_to_tile_frac(0.0, 0.0, 4);
        assert!((col - 8.0).abs() < 1e-9);
        assert!((row - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_frac_formulas_agree() {
        use projection::WebMercator;
        let (lon, lat) = (-73.356, 5.533);
        let (mx, my) = WebMercator::forward(lon, lat).unwrap();
        let (c1, r1) = mercator_to_tile_frac(mx, my, 17);
        let (c2, r2) = latlon_to_tile_frac(lon, lat, 17);
        assert!((c1 - c2).abs() < 1e-6);
        assert!((r1 - r2).abs() < 1e-6);
    }

    #[test]
    fn test_tile_top_left_round_trip() {
        let (x, y) = tile_top_left_mercator(37, 52, 7);
        let (col, row) = mercator_to_tile_frac(x, y, 7);
        assert!((col - 37.0).abs() < 1e-9);
        assert!((row - 52.0).abs() < 1e-9);
    }

    #[test]
    fn test_span_halves_per_zoom() {
        assert!((tile_span_m(1) - tile_span_m(2) * 2.0).abs() < 1e-6);
        // At zoom 17 a tile spans roughly 306 m at the equator.
        assert!((tile_span_m(17) - 305.748).abs() < 0.01);
    }
}
