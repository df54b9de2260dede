//! Static map handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Extension, Query},
    response::Response,
};
use metrics::{counter, histogram};
use serde::Deserialize;
use tracing::{error, instrument};
use trafo_common::{GeoPoint, TrafoError};

use staticmap::RenderOptions;

use super::{error_response, png_response};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MapParams {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub buffer_m: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub zoom: Option<u32>,
}

impl MapParams {
    fn coordinate(&self) -> Result<GeoPoint, TrafoError> {
        let lon = self
            .lon
            .ok_or_else(|| TrafoError::MissingParameter("lon".to_string()))?;
        let lat = self
            .lat
            .ok_or_else(|| TrafoError::MissingParameter("lat".to_string()))?;
        Ok(GeoPoint::new(lon, lat))
    }

    fn render_options(&self) -> RenderOptions {
        let defaults = RenderOptions::default();
        RenderOptions {
            buffer_m: self.buffer_m.unwrap_or(defaults.buffer_m),
            width_px: self.width.unwrap_or(defaults.width_px),
            height_px: self.height.unwrap_or(defaults.height_px),
            zoom: self.zoom.unwrap_or(defaults.zoom),
        }
    }
}

/// GET /api/map/satellite - aerial imagery snapshot of the site.
#[instrument(skip(state))]
pub async fn satellite_map_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<MapParams>,
) -> Response {
    let point = match params.coordinate() {
        Ok(point) => point,
        Err(err) => return error_response(&err),
    };
    let opts = params.render_options();

    let started = Instant::now();
    match state.renderer.render_satellite(point, &opts).await {
        Ok(png) => {
            counter!("satellite_maps_rendered_total").increment(1);
            histogram!("map_render_seconds").record(started.elapsed().as_secs_f64());
            png_response(png)
        }
        Err(err) => {
            counter!("map_render_failures_total").increment(1);
            error!(lon = point.lon, lat = point.lat, error = %err, "satellite render failed");
            error_response(&err)
        }
    }
}

/// GET /api/map/urban - street-map snapshot of the site.
#[instrument(skip(state))]
pub async fn urban_map_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<MapParams>,
) -> Response {
    let point = match params.coordinate() {
        Ok(point) => point,
        Err(err) => return error_response(&err),
    };

    let started = Instant::now();
    match state.renderer.render_urban(point).await {
        Ok(png) => {
            counter!("urban_maps_rendered_total").increment(1);
            histogram!("map_render_seconds").record(started.elapsed().as_secs_f64());
            png_response(png)
        }
        Err(err) => {
            counter!("map_render_failures_total").increment(1);
            error!(lon = point.lon, lat = point.lat, error = %err, "urban render failed");
            error_response(&err)
        }
    }
}
