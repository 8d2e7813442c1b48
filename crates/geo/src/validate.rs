//! Range and finiteness checks for latitudes, longitudes, and elevations.

/// Elevations beyond this magnitude (meters) are treated as data errors and
/// dropped rather than clamped. Covers everything from the Mariana Trench to
/// well above Everest.
pub const MAX_ELEVATION_M: f64 = 11_000.0;

/// Returns true if `lat` is a finite latitude in degrees within [-90, 90].
#[inline]
pub fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

/// Returns true if `lon` is a finite longitude in degrees within [-180, 180].
#[inline]
pub fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}

/// Returns true if the pair forms a valid position.
#[inline]
pub fn is_valid_position(lat: f64, lon: f64) -> bool {
    is_valid_latitude(lat) && is_valid_longitude(lon)
}

/// Returns true if `elevation` is finite and within the realistic range.
#[inline]
pub fn is_valid_elevation(elevation: f64) -> bool {
    elevation.is_finite() && elevation.abs() <= MAX_ELEVATION_M
}

/// Wraps a longitude into [-180, 180].
///
/// In-range values pass through bit-exact. Non-finite input is returned
/// unchanged; callers reject it separately.
pub fn normalize_longitude(lon: f64) -> f64 {
    if !lon.is_finite() || (-180.0..=180.0).contains(&lon) {
        return lon;
    }
    // closed form; a stepwise -360 loop never terminates once the f64
    // spacing around lon exceeds 360
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid folds the +180 boundary onto -180; values wrapping down
    // from above keep +180
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

/// Validates a latitude/longitude pair, wrapping the longitude into range.
///
/// Latitude outside [-90, 90] is rejected rather than wrapped; wrapping a
/// latitude past the poles is not geodetically meaningful. Returns the
/// normalized pair, or `None` if either value is non-finite or the latitude
/// is out of range.
pub fn validate_and_normalize(lat: f64, lon: f64) -> Option<(f64, f64)> {
    if !lat.is_finite() || !lon.is_finite() {
        return None;
    }
    if !(-90.0..=90.0).contains(&lat) {
        return None;
    }
    Some((lat, normalize_longitude(lon)))
}
