//! Common types and utilities shared across all trafo-report services.

pub mod error;
pub mod geo;

pub use error::{TrafoError, TrafoResult};
pub use geo::{BoundingBox, GeoPoint};
