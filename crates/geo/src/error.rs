//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
///
/// The pure computation functions signal failure through `Option`/empty
/// collections; this type covers the fallible boundaries (unit parsing,
/// JSON interop).
#[derive(Debug, Error)]
pub enum GeoError {
    /// Coordinate text did not match any supported notation
    #[error("Unrecognized coordinate format: {0}")]
    UnrecognizedFormat(String),

    /// Invalid coordinate values
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Unknown unit system name
    #[error("Unknown unit system: {0}")]
    UnknownUnitSystem(String),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for integration with caller-side error handling.
/// Range: 11xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Coordinate text did not match any supported notation
    UnrecognizedFormat = 11001,
    /// Invalid coordinate values
    InvalidCoordinate = 11002,
    /// Unknown unit system name
    UnknownUnitSystem = 11003,
    /// JSON parsing error
    JsonParsing = 11004,
}

impl GeoError {
    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::UnrecognizedFormat(_) => GeoErrorCode::UnrecognizedFormat,
            GeoError::InvalidCoordinate(_) => GeoErrorCode::InvalidCoordinate,
            GeoError::UnknownUnitSystem(_) => GeoErrorCode::UnknownUnitSystem,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }
}
