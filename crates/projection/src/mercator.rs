//! Web Mercator (EPSG:3857) projection.
//!
//! Spherical Mercator on the WGS84 semi-major axis, the projection used by
//! XYZ basemap tile pyramids. Forward maps geographic degrees (EPSG:4326)
//! to planar meters; inverse maps back.
//!
//! The projection diverges at the poles; latitudes beyond ±85.0511° (the
//! square-world cutoff) are rejected rather than clamped so that a bad
//! coordinate fails loudly instead of rendering the wrong place.

use std::f64::consts::PI;
use trafo_common::{TrafoError, TrafoResult};

/// WGS84 semi-major axis in meters (spherical Mercator radius).
pub const EARTH_RADIUS: f64 = 6378137.0;

/// Half-extent of the square Web Mercator world in meters.
pub const MAX_EXTENT: f64 = 20037508.342789244;

/// Latitude at which the Mercator world becomes square, in degrees.
pub const MAX_LATITUDE: f64 = 85.05112877980659;

/// Web Mercator projection (EPSG:4326 ↔ EPSG:3857).
#[derive(Debug, Clone, Copy)]
pub struct WebMercator;

impl WebMercator {
    /// Project geographic degrees to Web Mercator meters.
    ///
    /// Fails with `ProjectionError` for non-finite input, longitudes
    /// outside [-180, 180], or latitudes outside the Mercator domain.
    pub fn forward(lon: f64, lat: f64) -> TrafoResult<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return Err(TrafoError::ProjectionError(format!(
                "non-finite coordinate ({}, {})",
                lon, lat
            )));
        }
        if lon.abs() > 180.0 {
            return Err(TrafoError::ProjectionError(format!(
                "longitude {} outside [-180, 180]",
                lon
            )));
        }
        if lat.abs() > MAX_LATITUDE {
            return Err(TrafoError::ProjectionError(format!(
                "latitude {} outside Web Mercator domain [-{}, {}]",
                lat, MAX_LATITUDE, MAX_LATITUDE
            )));
        }

        let x = EARTH_RADIUS * lon.to_radians();
        let y = EARTH_RADIUS * (PI / 4.0 + lat.to_radians() / 2.0).tan().ln();
        Ok((x, y))
    }

    /// Unproject Web Mercator meters back to geographic degrees.
    pub fn inverse(x: f64, y: f64) -> (f64, f64) {
        let lon = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        (lon, lat)
    }
}
