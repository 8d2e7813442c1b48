//! Coordinate parsing and geodesic distance calculations for Waypoint.
//!
//! This crate provides:
//! - Free-form coordinate text parsing (DMS and decimal notations)
//! - Decimal degrees <-> degrees/minutes/seconds conversion
//! - Haversine (2D) and elevation-aware (3D) distance calculations
//! - Pairwise distance matrices with statistics and cumulative path length
//! - Magnitude-adaptive unit formatting
//! - WASM bindings for browser usage
//!
//! # Example
//!
//! ```
//! use waypoint_geo::{parse_coordinate, calculate_2d_distance};
//!
//! let point = parse_coordinate("52° 31' 12.0\" N 13° 24' 18.0\" E").unwrap();
//! assert!((point.latitude - 52.52).abs() < 0.001);
//!
//! // Berlin to Paris, roughly 878 km
//! let distance = calculate_2d_distance(52.5200, 13.4050, 48.8566, 2.3522).unwrap();
//! assert!((distance.km - 878.0).abs() < 10.0);
//! ```

mod distance;
mod dms;
mod error;
mod matrix;
mod parse;
mod units;
mod validate;

#[cfg(feature = "wasm")]
mod wasm;

pub use distance::{
    calculate_2d_distance, calculate_3d_distance, distance_breakdown, haversine_distance,
    Distance, DistanceBreakdown, EARTH_RADIUS_KM, EARTH_RADIUS_MI,
};
pub use dms::{decimal_to_dms, dms_to_decimal, format_decimal_degrees, Axis, Cardinal, DmsAngle};
pub use error::{GeoError, GeoErrorCode, Result};
pub use matrix::{
    calculate_distance_matrix, cumulative_distance, cumulative_distance_3d, distance_statistics,
    DistanceMatrix, DistanceReport, Statistics,
};
pub use parse::{
    detect_format, matched_pattern_name, parse_coordinate, parse_multiple_coordinates,
    try_parse_coordinate, CoordinateFormat,
};
pub use units::{
    convert_elevation, format_distance_with_dynamic_units, ElevationUnit, FormattedDistance,
    UnitSystem, INTERNATIONAL_FOOT_M, SURVEY_FOOT_M,
};
pub use validate::{
    is_valid_elevation, is_valid_latitude, is_valid_longitude, is_valid_position,
    normalize_longitude, validate_and_normalize, MAX_ELEVATION_M,
};

/// A geographic coordinate with latitude, longitude, and optional elevation.
///
/// Value object: created by the parser or by the caller, never mutated.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Optional display name (point label)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
    /// Elevation above sea level in meters, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

impl Coordinate {
    /// Creates a new coordinate without name or elevation.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            name: None,
            latitude,
            longitude,
            elevation: None,
        }
    }

    /// Returns a copy of this coordinate with the given name attached.
    #[inline]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns a copy of this coordinate with the given elevation in meters.
    #[inline]
    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation);
        self
    }

    /// Returns true if latitude and longitude are finite and in range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        is_valid_position(self.latitude, self.longitude)
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Rounds a value to the given number of decimal places.
#[inline]
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
