//! Haversine distance calculation and the planar per-pair breakdown.
//!
//! Two independent algorithms live here on purpose. The Haversine path is
//! the geometrically rigorous one and feeds the matrix and statistics. The
//! planar meters-per-degree path linearizes each axis separately so callers
//! can show the degree-to-meter expansion step by step; the two results may
//! diverge slightly at large distances and must not be unified.

use crate::validate::{is_valid_elevation, is_valid_position};
use crate::{round_to, Coordinate};
use serde::{Deserialize, Serialize};

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in miles.
pub const EARTH_RADIUS_MI: f64 = 3959.0;

/// A non-negative distance in both kilometer and mile units.
///
/// Values are rounded to 6 decimal places at construction to bound
/// floating-point drift in downstream display and comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    /// Distance in kilometers
    pub km: f64,
    /// Distance in miles
    pub miles: f64,
}

impl Distance {
    /// The zero distance.
    #[inline]
    pub fn zero() -> Self {
        Self { km: 0.0, miles: 0.0 }
    }

    /// Builds a distance from a central angle in radians.
    #[inline]
    fn from_central_angle(angle: f64) -> Self {
        Self {
            km: round_to(EARTH_RADIUS_KM * angle, 6),
            miles: round_to(EARTH_RADIUS_MI * angle, 6),
        }
    }

    /// Builds a distance from kilometers, deriving miles by the radius ratio.
    #[inline]
    pub(crate) fn from_km(km: f64) -> Self {
        Self {
            km: round_to(km, 6),
            miles: round_to(km * (EARTH_RADIUS_MI / EARTH_RADIUS_KM), 6),
        }
    }

    /// Component-wise sum, for cumulative path lengths.
    #[inline]
    pub(crate) fn add(self, other: Self) -> Self {
        Self {
            km: round_to(self.km + other.km, 6),
            miles: round_to(self.miles + other.miles, 6),
        }
    }
}

/// Central angle between two points in radians (Haversine formula).
fn central_angle(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Great-circle distance between two coordinates in kilometers.
///
/// Assumes both points are valid; use [`calculate_2d_distance`] for the
/// checked variant.
///
/// # Example
/// ```
/// use waypoint_geo::{haversine_distance, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    EARTH_RADIUS_KM * central_angle(from, to)
}

/// Great-circle (2D) distance between two positions.
///
/// Both points must independently pass range validation; otherwise `None`
/// is returned rather than a degenerate distance.
pub fn calculate_2d_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> Option<Distance> {
    if !is_valid_position(lat1, lon1) || !is_valid_position(lat2, lon2) {
        return None;
    }

    let angle = central_angle(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2));
    Some(Distance::from_central_angle(angle))
}

/// Elevation-aware (3D) distance between two positions.
///
/// Combines the great-circle distance with the elevation delta by the
/// Pythagorean theorem. Missing or non-finite elevations degrade gracefully
/// to the 2D result instead of failing.
pub fn calculate_3d_distance(
    lat1: f64,
    lon1: f64,
    elev1: Option<f64>,
    lat2: f64,
    lon2: f64,
    elev2: Option<f64>,
) -> Option<Distance> {
    if !is_valid_position(lat1, lon1) || !is_valid_position(lat2, lon2) {
        return None;
    }

    let angle = central_angle(&Coordinate::new(lat1, lon1), &Coordinate::new(lat2, lon2));
    let surface_km = EARTH_RADIUS_KM * angle;

    match (elev1, elev2) {
        (Some(e1), Some(e2)) if e1.is_finite() && e2.is_finite() => {
            let surface_m = surface_km * 1000.0;
            let delta_m = (e2 - e1).abs();
            let slant_m = surface_m.hypot(delta_m);
            Some(Distance::from_km(slant_m / 1000.0))
        }
        _ => Some(Distance::from_central_angle(angle)),
    }
}

/// Per-pair explanatory breakdown of a distance calculation.
///
/// Built from the planar approximation, not from Haversine, so every
/// intermediate figure can be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceBreakdown {
    /// Meters per degree of latitude at the pair's mean latitude
    pub meters_per_degree_lat: f64,
    /// Meters per degree of longitude at the pair's mean latitude
    pub meters_per_degree_lon: f64,
    /// North/south offset in meters
    pub delta_lat_m: f64,
    /// East/west offset in meters
    pub delta_lon_m: f64,
    /// Planar horizontal offset in meters
    pub horizontal_m: f64,
    /// Elevation delta in meters, when both elevations are usable
    pub elevation_delta_m: Option<f64>,
    /// Slant distance in meters (equals `horizontal_m` without elevations)
    pub total_m: f64,
}

/// Computes the explanatory planar breakdown between two coordinates.
///
/// Degree offsets are expanded to meters with empirical latitude-dependent
/// constants, evaluated at the mean latitude of the pair. Returns `None`
/// when either coordinate is out of range.
pub fn distance_breakdown(from: &Coordinate, to: &Coordinate) -> Option<DistanceBreakdown> {
    if !from.is_valid() || !to.is_valid() {
        return None;
    }

    let phi = ((from.latitude + to.latitude) / 2.0).to_radians();
    let meters_per_degree_lat = 111_132.92 - 559.82 * (2.0 * phi).cos() + 1.175 * (4.0 * phi).cos();
    let meters_per_degree_lon = 111_412.84 * phi.cos() - 93.5 * (3.0 * phi).cos();

    let delta_lat_m = (to.latitude - from.latitude) * meters_per_degree_lat;
    let delta_lon_m = (to.longitude - from.longitude) * meters_per_degree_lon;
    let horizontal_m = delta_lat_m.hypot(delta_lon_m);

    let elevation_delta_m = match (from.elevation, to.elevation) {
        (Some(e1), Some(e2)) if is_valid_elevation(e1) && is_valid_elevation(e2) => {
            Some((e2 - e1).abs())
        }
        _ => None,
    };
    let total_m = match elevation_delta_m {
        Some(delta) => horizontal_m.hypot(delta),
        None => horizontal_m,
    };

    Some(DistanceBreakdown {
        meters_per_degree_lat,
        meters_per_degree_lon,
        delta_lat_m,
        delta_lon_m,
        horizontal_m,
        elevation_delta_m,
        total_m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BERLIN: (f64, f64) = (52.5200, 13.4050);
    const PARIS: (f64, f64) = (48.8566, 2.3522);
    const NEW_YORK: (f64, f64) = (40.7128, -74.0060);
    const TOKYO: (f64, f64) = (35.6762, 139.6503);

    #[test]
    fn test_berlin_to_paris() {
        let d = calculate_2d_distance(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1).unwrap();
        assert!((d.km - 878.0).abs() < 5.0, "Berlin-Paris: {}", d.km);
        assert!((d.miles - 545.0).abs() < 5.0, "Berlin-Paris: {}", d.miles);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        let d = calculate_2d_distance(NEW_YORK.0, NEW_YORK.1, TOKYO.0, TOKYO.1).unwrap();
        assert!((d.km - 10838.0).abs() < 50.0, "NYC-Tokyo: {}", d.km);
    }

    #[test]
    fn test_one_degree_of_longitude_at_equator() {
        let d = calculate_2d_distance(0.0, 0.0, 0.0, 1.0).unwrap();
        assert!((d.km - 111.19).abs() < 0.01, "got {}", d.km);
    }

    #[test]
    fn test_identity_is_zero() {
        let d = calculate_2d_distance(BERLIN.0, BERLIN.1, BERLIN.0, BERLIN.1).unwrap();
        assert_eq!(d, Distance::zero());
    }

    #[test]
    fn test_symmetry() {
        let d1 = calculate_2d_distance(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1).unwrap();
        let d2 = calculate_2d_distance(PARIS.0, PARIS.1, BERLIN.0, BERLIN.1).unwrap();
        assert_eq!(d1.km, d2.km);
    }

    #[test]
    fn test_invalid_input_returns_none() {
        assert!(calculate_2d_distance(91.0, 0.0, 0.0, 0.0).is_none());
        assert!(calculate_2d_distance(0.0, 0.0, 0.0, 181.0).is_none());
        assert!(calculate_2d_distance(f64::NAN, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_rounded_to_six_places() {
        let d = calculate_2d_distance(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1).unwrap();
        assert_eq!(d.km, round_to(d.km, 6));
        assert_eq!(d.miles, round_to(d.miles, 6));
    }

    #[test]
    fn test_3d_with_elevations() {
        // two points 0.01 degrees apart with a 1000 m elevation delta
        let d2 = calculate_2d_distance(46.0, 8.0, 46.01, 8.0).unwrap();
        let d3 =
            calculate_3d_distance(46.0, 8.0, Some(400.0), 46.01, 8.0, Some(1400.0)).unwrap();
        assert!(d3.km > d2.km);

        let expected = ((d2.km * 1000.0).powi(2) + 1000.0f64.powi(2)).sqrt() / 1000.0;
        assert!((d3.km - expected).abs() < 1e-4);
    }

    #[test]
    fn test_3d_degrades_to_2d_without_elevations() {
        let d2 = calculate_2d_distance(BERLIN.0, BERLIN.1, PARIS.0, PARIS.1).unwrap();

        let d3 = calculate_3d_distance(BERLIN.0, BERLIN.1, None, PARIS.0, PARIS.1, None).unwrap();
        assert_eq!(d2, d3);

        let d3 = calculate_3d_distance(
            BERLIN.0,
            BERLIN.1,
            Some(f64::NAN),
            PARIS.0,
            PARIS.1,
            Some(35.0),
        )
        .unwrap();
        assert_eq!(d2, d3);
    }

    #[test]
    fn test_3d_invalid_position_returns_none() {
        assert!(calculate_3d_distance(95.0, 0.0, Some(0.0), 0.0, 0.0, Some(0.0)).is_none());
    }

    #[test]
    fn test_breakdown_close_to_haversine_at_short_range() {
        let from = Coordinate::new(46.0, 8.0);
        let to = Coordinate::new(46.02, 8.03);

        let breakdown = distance_breakdown(&from, &to).unwrap();
        let haversine_m = haversine_distance(&from, &to) * 1000.0;

        let error = (breakdown.horizontal_m - haversine_m).abs() / haversine_m;
        assert!(error < 0.005, "relative error {error}");
    }

    #[test]
    fn test_breakdown_meters_per_degree_at_equator() {
        let from = Coordinate::new(0.0, 0.0);
        let to = Coordinate::new(0.0, 1.0);

        let breakdown = distance_breakdown(&from, &to).unwrap();
        // ~110.57 km per degree latitude, ~111.32 km per degree longitude
        assert!((breakdown.meters_per_degree_lat - 110_574.0).abs() < 10.0);
        assert!((breakdown.meters_per_degree_lon - 111_320.0).abs() < 10.0);
        assert_eq!(breakdown.delta_lat_m, 0.0);
    }

    #[test]
    fn test_breakdown_elevation_component() {
        let from = Coordinate::new(46.0, 8.0).with_elevation(400.0);
        let to = Coordinate::new(46.0, 8.0).with_elevation(1400.0);

        let breakdown = distance_breakdown(&from, &to).unwrap();
        assert_eq!(breakdown.elevation_delta_m, Some(1000.0));
        assert!((breakdown.total_m - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakdown_invalid_returns_none() {
        let bad = Coordinate::new(91.0, 0.0);
        assert!(distance_breakdown(&bad, &Coordinate::new(0.0, 0.0)).is_none());
    }
}
