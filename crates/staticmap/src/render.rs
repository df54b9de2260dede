//! Map renderers: satellite bounding-box mode and urban canvas mode.

use std::time::Instant;

use image::imageops::{crop_imm, overlay, resize, FilterType};
use image::RgbaImage;
use tracing::{info, instrument};
use trafo_common::{BoundingBox, GeoPoint, TrafoError, TrafoResult};

use projection::WebMercator;

use crate::fetch::TileFetcher;
use crate::marker::draw_marker;
use crate::png::encode_rgba;
use crate::provider::TileProvider;
use crate::tiles::{
    latlon_to_tile_frac, mercator_to_tile_frac, tile_count, tile_span_m, tile_top_left_mercator,
    TileCoord, TILE_SIZE,
};

/// Marker radius on the satellite canvas.
const SATELLITE_MARKER_RADIUS: i32 = 10;

/// Urban canvas dimensions and marker, fixed by the report layout.
const URBAN_WIDTH: u32 = 600;
const URBAN_HEIGHT: u32 = 400;
const URBAN_ZOOM: u32 = 17;
const URBAN_MARKER_RADIUS: i32 = 12;

/// Upper bound on tiles fetched per render. A 300 m buffer at zoom 17
/// needs at most 9; anything near this limit is a parameter mistake.
const MAX_TILES_PER_RENDER: u32 = 64;

/// Options for the satellite renderer.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Half-side of the square view box, in meters.
    pub buffer_m: f64,
    pub width_px: u32,
    pub height_px: u32,
    /// Basemap tile zoom level.
    pub zoom: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            buffer_m: 300.0,
            width_px: 900,
            height_px: 700,
            zoom: 17,
        }
    }
}

impl RenderOptions {
    fn validate(&self) -> TrafoResult<()> {
        if !(self.buffer_m.is_finite() && self.buffer_m > 0.0) {
            return Err(TrafoError::InvalidParameter {
                param: "buffer_m".to_string(),
                message: format!("must be a positive number, got {}", self.buffer_m),
            });
        }
        if self.buffer_m > 100_000.0 {
            return Err(TrafoError::InvalidParameter {
                param: "buffer_m".to_string(),
                message: "capped at 100 km".to_string(),
            });
        }
        if self.width_px == 0 || self.height_px == 0 {
            return Err(TrafoError::InvalidParameter {
                param: "width/height".to_string(),
                message: "canvas dimensions must be positive".to_string(),
            });
        }
        if self.width_px > 4096 || self.height_px > 4096 {
            return Err(TrafoError::InvalidParameter {
                param: "width/height".to_string(),
                message: "canvas dimensions capped at 4096".to_string(),
            });
        }
        if !(1..=22).contains(&self.zoom) {
            return Err(TrafoError::InvalidParameter {
                param: "zoom".to_string(),
                message: format!("must be in 1..=22, got {}", self.zoom),
            });
        }
        Ok(())
    }
}

/// Stateless renderer over a tile fetcher and the two basemap providers.
///
/// Holds no per-call state; concurrent renders are independent.
pub struct MapRenderer {
    fetcher: TileFetcher,
    satellite: TileProvider,
    urban: TileProvider,
}

impl MapRenderer {
    pub fn new(satellite: TileProvider, urban: TileProvider) -> TrafoResult<Self> {
        Ok(Self {
            fetcher: TileFetcher::new()?,
            satellite,
            urban,
        })
    }

    /// Render a satellite view: a `2 * buffer_m` square box around the
    /// coordinate, resampled onto the requested canvas, marker at the
    /// point. Returns PNG bytes.
    ///
    /// Every failure past parameter validation (reprojection, fetch,
    /// decode) surfaces as `RenderError` wrapping the cause.
    #[instrument(skip(self))]
    pub async fn render_satellite(
        &self,
        point: GeoPoint,
        opts: &RenderOptions,
    ) -> TrafoResult<Vec<u8>> {
        opts.validate()?;
        let started = Instant::now();
        let png = self
            .satellite_inner(point, opts)
            .await
            .map_err(into_render_error)?;
        info!(
            lon = point.lon,
            lat = point.lat,
            zoom = opts.zoom,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = png.len(),
            "rendered satellite map"
        );
        Ok(png)
    }

    async fn satellite_inner(
        &self,
        point: GeoPoint,
        opts: &RenderOptions,
    ) -> TrafoResult<Vec<u8>> {
        let (cx, cy) = WebMercator::forward(point.lon, point.lat)?;
        let bbox = BoundingBox::centered(cx, cy, opts.buffer_m);

        let n = tile_count(opts.zoom) as i64;
        let span = tile_span_m(opts.zoom);

        // Tile index range covering the box. Columns wrap at the
        // antimeridian; rows are clamped to the pyramid.
        let (tx0, ty0) = mercator_to_tile_frac(bbox.min_x, bbox.max_y, opts.zoom);
        let (tx1, ty1) = mercator_to_tile_frac(bbox.max_x, bbox.min_y, opts.zoom);
        let col0 = tx0.floor() as i64;
        let col1 = tx1.floor() as i64;
        let row0 = (ty0.floor() as i64).clamp(0, n - 1);
        let row1 = (ty1.floor() as i64).clamp(0, n - 1);
        let cols = (col1 - col0 + 1) as u32;
        let rows = (row1 - row0 + 1) as u32;

        let tile_budget = cols as u64 * rows as u64;
        if tile_budget > MAX_TILES_PER_RENDER as u64 {
            return Err(TrafoError::InvalidParameter {
                param: "buffer_m/zoom".to_string(),
                message: format!(
                    "view requires {} tiles, max {}",
                    tile_budget, MAX_TILES_PER_RENDER
                ),
            });
        }

        let mosaic = self
            .fetch_mosaic(&self.satellite, opts.zoom, col0, row0, cols, rows)
            .await?;

        // Crop the box out of the mosaic, then resample to the canvas.
        let (origin_x, origin_y) = tile_top_left_mercator(col0, row0, opts.zoom);
        let res = span / TILE_SIZE as f64; // meters per pixel
        let crop_x = (((bbox.min_x - origin_x) / res).round().max(0.0) as u32).min(mosaic.width() - 1);
        let crop_y = (((origin_y - bbox.max_y) / res).round().max(0.0) as u32).min(mosaic.height() - 1);
        let crop_w = ((bbox.width() / res).round() as u32)
            .clamp(1, mosaic.width() - crop_x);
        let crop_h = ((bbox.height() / res).round() as u32)
            .clamp(1, mosaic.height() - crop_y);

        let cropped = crop_imm(&mosaic, crop_x, crop_y, crop_w, crop_h).to_image();
        let mut canvas = resize(&cropped, opts.width_px, opts.height_px, FilterType::Triangle);

        // Marker at the projected point, mapped through crop and resample.
        let marker_x = ((cx - origin_x) / res - crop_x as f64)
            * (opts.width_px as f64 / crop_w as f64);
        let marker_y = ((origin_y - cy) / res - crop_y as f64)
            * (opts.height_px as f64 / crop_h as f64);
        draw_marker(
            &mut canvas,
            marker_x.round() as i32,
            marker_y.round() as i32,
            SATELLITE_MARKER_RADIUS,
        );

        encode_rgba(
            canvas.as_raw(),
            opts.width_px as usize,
            opts.height_px as usize,
        )
    }

    /// Render the urban companion view: a fixed 600x400 street-map canvas
    /// centered on the coordinate with a 12 px marker. Returns PNG bytes.
    #[instrument(skip(self))]
    pub async fn render_urban(&self, point: GeoPoint) -> TrafoResult<Vec<u8>> {
        let started = Instant::now();
        let png = self
            .urban_inner(point)
            .await
            .map_err(into_render_error)?;
        info!(
            lon = point.lon,
            lat = point.lat,
            elapsed_ms = started.elapsed().as_millis() as u64,
            bytes = png.len(),
            "rendered urban map"
        );
        Ok(png)
    }

    async fn urban_inner(&self, point: GeoPoint) -> TrafoResult<Vec<u8>> {
        // Same coordinate domain as the satellite path; fail before any
        // network I/O on a bad coordinate.
        WebMercator::forward(point.lon, point.lat)?;

        let n = tile_count(URBAN_ZOOM) as i64;
        let (col_f, row_f) = latlon_to_tile_frac(point.lon, point.lat, URBAN_ZOOM);

        // Global pixel coordinates of the canvas corners.
        let center_px = col_f * TILE_SIZE as f64;
        let center_py = row_f * TILE_SIZE as f64;
        let left = center_px - (URBAN_WIDTH / 2) as f64;
        let top = center_py - (URBAN_HEIGHT / 2) as f64;

        let col0 = (left / TILE_SIZE as f64).floor() as i64;
        let col1 = ((left + URBAN_WIDTH as f64 - 1.0) / TILE_SIZE as f64).floor() as i64;
        let row0 = ((top / TILE_SIZE as f64).floor() as i64).clamp(0, n - 1);
        let row1 = (((top + URBAN_HEIGHT as f64 - 1.0) / TILE_SIZE as f64).floor() as i64)
            .clamp(0, n - 1);

        let mut jobs = Vec::new();
        for row in row0..=row1 {
            for col in col0..=col1 {
                let coord = TileCoord::new(URBAN_ZOOM, col.rem_euclid(n) as u32, row as u32);
                let offset_x = (col * TILE_SIZE as i64) as f64 - left;
                let offset_y = (row * TILE_SIZE as i64) as f64 - top;
                jobs.push(async move {
                    let tile = self.fetch_and_decode(&self.urban, coord).await?;
                    Ok::<_, TrafoError>((offset_x, offset_y, tile))
                });
            }
        }

        let tiles = futures::future::try_join_all(jobs).await?;
        let mut canvas = RgbaImage::new(URBAN_WIDTH, URBAN_HEIGHT);
        for (offset_x, offset_y, tile) in tiles {
            overlay(
                &mut canvas,
                &tile,
                offset_x.round() as i64,
                offset_y.round() as i64,
            );
        }

        draw_marker(
            &mut canvas,
            (URBAN_WIDTH / 2) as i32,
            (URBAN_HEIGHT / 2) as i32,
            URBAN_MARKER_RADIUS,
        );

        encode_rgba(
            canvas.as_raw(),
            URBAN_WIDTH as usize,
            URBAN_HEIGHT as usize,
        )
    }

    /// Fetch a tile grid and composite it into one mosaic image.
    async fn fetch_mosaic(
        &self,
        provider: &TileProvider,
        zoom: u32,
        col0: i64,
        row0: i64,
        cols: u32,
        rows: u32,
    ) -> TrafoResult<RgbaImage> {
        let n = tile_count(zoom) as i64;

        let mut jobs = Vec::new();
        for ri in 0..rows {
            for ci in 0..cols {
                let col = col0 + ci as i64;
                let row = row0 + ri as i64;
                let coord = TileCoord::new(zoom, col.rem_euclid(n) as u32, row as u32);
                jobs.push(async move {
                    let tile = self.fetch_and_decode(provider, coord).await?;
                    Ok::<_, TrafoError>((ci, ri, tile))
                });
            }
        }

        let tiles = futures::future::try_join_all(jobs).await?;
        let mut mosaic = RgbaImage::new(cols * TILE_SIZE, rows * TILE_SIZE);
        for (ci, ri, tile) in tiles {
            overlay(
                &mut mosaic,
                &tile,
                (ci * TILE_SIZE) as i64,
                (ri * TILE_SIZE) as i64,
            );
        }
        Ok(mosaic)
    }

    async fn fetch_and_decode(
        &self,
        provider: &TileProvider,
        coord: TileCoord,
    ) -> TrafoResult<RgbaImage> {
        let bytes = self.fetcher.fetch_tile(provider, coord).await?;
        let img = image::load_from_memory(&bytes).map_err(|e| {
            TrafoError::TileProviderError(format!(
                "decoding tile {}/{}/{} from {} failed: {}",
                coord.z, coord.x, coord.y, provider.name, e
            ))
        })?;
        Ok(img.to_rgba8())
    }
}

/// Collapse internal causes into the renderer's single public error,
/// keeping parameter errors intact for the caller.
fn into_render_error(err: TrafoError) -> TrafoError {
    match err {
        e @ TrafoError::RenderError(_)
        | e @ TrafoError::InvalidParameter { .. }
        | e @ TrafoError::MissingParameter(_)
        | e @ TrafoError::InvalidArgument(_) => e,
        other => TrafoError::RenderError(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_renderer() -> MapRenderer {
        // Unroutable providers: any test reaching the network would fail
        // loudly rather than hit a public service.
        MapRenderer::new(
            TileProvider::new("sat-test", "http://invalid.invalid/{z}/{y}/{x}"),
            TileProvider::new("urban-test", "http://invalid.invalid/{z}/{x}/{y}.png"),
        )
        .unwrap()
    }

    #[test]
    fn test_default_options() {
        let opts = RenderOptions::default();
        assert_eq!(opts.buffer_m, 300.0);
        assert_eq!(opts.width_px, 900);
        assert_eq!(opts.height_px, 700);
        assert_eq!(opts.zoom, 17);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_option_validation() {
        let mut opts = RenderOptions::default();
        opts.buffer_m = 0.0;
        assert!(opts.validate().is_err());

        let mut opts = RenderOptions::default();
        opts.zoom = 0;
        assert!(opts.validate().is_err());

        let mut opts = RenderOptions::default();
        opts.width_px = 0;
        assert!(opts.validate().is_err());
    }

    #[tokio::test]
    async fn test_out_of_range_latitude_is_render_error() {
        let renderer = test_renderer();
        let err = renderer
            .render_satellite(GeoPoint::new(0.0, 200.0), &RenderOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, TrafoError::RenderError(_)));

        let err = renderer
            .render_urban(GeoPoint::new(0.0, 200.0))
            .await
            .unwrap_err();
        assert!(matches!(err, TrafoError::RenderError(_)));
    }

    #[tokio::test]
    async fn test_invalid_buffer_is_parameter_error() {
        let renderer = test_renderer();
        let mut opts = RenderOptions::default();
        opts.buffer_m = -5.0;
        let err = renderer
            .render_satellite(GeoPoint::new(-73.3, 5.5), &opts)
            .await
            .unwrap_err();
        assert!(matches!(err, TrafoError::InvalidParameter { .. }));
    }
}
