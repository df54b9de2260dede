//! Basemap tile providers.

use crate::tiles::TileCoord;

/// A remote XYZ tile endpoint.
///
/// The URL template uses `{z}`, `{x}` and `{y}` placeholders.
#[derive(Debug, Clone)]
pub struct TileProvider {
    pub name: String,
    url_template: String,
}

impl TileProvider {
    pub fn new(name: impl Into<String>, url_template: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
        }
    }

    /// Esri World Imagery aerial/satellite tiles (note y before x in the
    /// ArcGIS path layout).
    pub fn esri_world_imagery() -> Self {
        Self::new(
            "esri-world-imagery",
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
        )
    }

    /// OpenStreetMap raster street tiles.
    pub fn openstreetmap() -> Self {
        Self::new("openstreetmap", "https://tile.openstreetmap.org/{z}/{x}/{y}.png")
    }

    /// Expand the template for one tile.
    pub fn tile_url(&self, coord: TileCoord) -> String {
        self.url_template
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_esri_url_layout() {
        let url = TileProvider::esri_world_imagery().tile_url(TileCoord::new(17, 38832, 64742));
        assert_eq!(
            url,
            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/17/64742/38832"
        );
    }

    #[test]
    fn test_osm_url_layout() {
        let url = TileProvider::openstreetmap().tile_url(TileCoord::new(3, 2, 5));
        assert_eq!(url, "https://tile.openstreetmap.org/3/2/5.png");
    }

    #[test]
    fn test_custom_template() {
        let provider = TileProvider::new("test", "http://127.0.0.1:9000/{z}/{x}/{y}.png");
        assert_eq!(
            provider.tile_url(TileCoord::new(1, 0, 1)),
            "http://127.0.0.1:9000/1/0/1.png"
        );
    }
}
