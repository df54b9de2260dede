//! Error types for trafo-report services.

use thiserror::Error;

/// Result type alias using TrafoError.
pub type TrafoResult<T> = Result<T, TrafoError>;

/// Primary error type for report-core operations.
#[derive(Debug, Error)]
pub enum TrafoError {
    // === Input Errors ===
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // === Map Rendering Errors ===
    #[error("Projection error: {0}")]
    ProjectionError(String),

    #[error("Tile provider error: {0}")]
    TileProviderError(String),

    #[error("Rendering failed: {0}")]
    RenderError(String),

    // === Infrastructure Errors ===
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl TrafoError {
    /// Short machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            TrafoError::MissingParameter(_) => "MissingParameterValue",
            TrafoError::InvalidParameter { .. } => "InvalidParameterValue",
            TrafoError::InvalidArgument(_) => "InvalidArgument",
            TrafoError::ProjectionError(_) => "ProjectionError",
            TrafoError::TileProviderError(_) => "TileProviderError",
            TrafoError::RenderError(_) => "RenderError",
            TrafoError::InternalError(_) => "InternalError",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            TrafoError::MissingParameter(_)
            | TrafoError::InvalidParameter { .. }
            | TrafoError::InvalidArgument(_) => 400,

            TrafoError::TileProviderError(_) => 502,

            TrafoError::ProjectionError(_)
            | TrafoError::RenderError(_)
            | TrafoError::InternalError(_) => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for TrafoError {
    fn from(err: std::io::Error) -> Self {
        TrafoError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for TrafoError {
    fn from(err: serde_json::Error) -> Self {
        TrafoError::InternalError(format!("JSON error: {}", err))
    }
}
