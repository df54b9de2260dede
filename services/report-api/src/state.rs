//! Application state and shared resources.

use anyhow::Result;
use std::env;

use staticmap::{MapRenderer, TileProvider};

/// Shared application state.
pub struct AppState {
    pub renderer: MapRenderer,
}

impl AppState {
    pub fn new() -> Result<Self> {
        let satellite = match env::var("SATELLITE_TILE_URL") {
            Ok(template) => TileProvider::new("satellite", template),
            Err(_) => TileProvider::esri_world_imagery(),
        };
        let urban = match env::var("URBAN_TILE_URL") {
            Ok(template) => TileProvider::new("urban", template),
            Err(_) => TileProvider::openstreetmap(),
        };

        Ok(Self {
            renderer: MapRenderer::new(satellite, urban)?,
        })
    }
}
